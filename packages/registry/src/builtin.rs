//! Built-in palette: the minimum props each block and component needs to
//! render without further input.

use crate::schema::{BlockSchema, ChildSeed, ComponentSchema, EditableField, FieldKind};
use serde_json::json;
use shopfront_model::{
    BlockType, ComponentType, Language, LocalizedText, PropValue, Props, StyleMap,
};

fn rich(ru: &str, en: &str, uz: &str) -> PropValue {
    LocalizedText::new()
        .with(Language::Ru, ru)
        .with(Language::En, en)
        .with(Language::Uz, uz)
        .into()
}

fn rich_button(ru: &str, en: &str, uz: &str, href: &str) -> PropValue {
    let mut content = LocalizedText::new()
        .with(Language::Ru, ru)
        .with(Language::En, en)
        .with(Language::Uz, uz);
    content.href = Some(href.to_string());
    content.into()
}

fn props<const N: usize>(entries: [(&str, PropValue); N]) -> Props {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn style<const N: usize>(entries: [(&str, serde_json::Value); N]) -> StyleMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn field(key: &str, label: &str, kind: FieldKind) -> EditableField {
    EditableField::new(key, label, kind)
}

pub(crate) fn block_schema(block_type: BlockType) -> BlockSchema {
    match block_type {
        BlockType::Hero => BlockSchema {
            default_props: props([
                ("title", rich("Новая коллекция", "New collection", "Yangi kolleksiya")),
                ("subtitle", rich("Откройте для себя", "Discover the season", "Mavsumni kashf eting")),
                ("button", rich_button("В каталог", "Shop now", "Katalogga", "/catalog")),
                ("backgroundImage", "".into()),
            ]),
            editable_fields: vec![
                field("title", "Title", FieldKind::RichText),
                field("subtitle", "Subtitle", FieldKind::RichText),
                field("button", "Button", FieldKind::RichButton),
                field("backgroundImage", "Background", FieldKind::Image),
            ],
            default_children: Some(vec![
                ChildSeed::new(ComponentType::Text).content_from("title"),
                ChildSeed::new(ComponentType::Text).content_from("subtitle"),
                ChildSeed::new(ComponentType::Button).content_from("button"),
            ]),
        },
        BlockType::HeroSplit => BlockSchema {
            default_props: props([
                ("title", rich("Новая коллекция", "New collection", "Yangi kolleksiya")),
                ("image", "".into()),
                ("imagePosition", "right".into()),
            ]),
            editable_fields: vec![
                field("title", "Title", FieldKind::RichText),
                field("image", "Image", FieldKind::Image),
            ],
            default_children: Some(vec![
                ChildSeed::new(ComponentType::Text).content_from("title"),
                ChildSeed::new(ComponentType::Image),
            ]),
        },
        BlockType::HeroCarousel => BlockSchema {
            default_props: props([
                ("slides", PropValue::List(Vec::new())),
                ("autoplay", true.into()),
                ("interval", 5000_i64.into()),
            ]),
            editable_fields: vec![
                field("slides", "Slides", FieldKind::List),
                field("autoplay", "Autoplay", FieldKind::Toggle),
                field("interval", "Interval (ms)", FieldKind::Number),
            ],
            default_children: None,
        },
        BlockType::Testimonials
        | BlockType::TestimonialsGrid
        | BlockType::TestimonialsCarousel => BlockSchema {
            default_props: props([
                ("title", rich("Отзывы", "Testimonials", "Fikrlar")),
                ("items", PropValue::List(Vec::new())),
                ("columns", 3_i64.into()),
            ]),
            editable_fields: vec![
                field("title", "Title", FieldKind::RichText),
                field("items", "Testimonials", FieldKind::List),
                field("columns", "Columns", FieldKind::Number),
            ],
            default_children: None,
        },
        BlockType::Navigation => BlockSchema {
            default_props: props([
                ("logo", "".into()),
                ("links", PropValue::List(Vec::new())),
                ("sticky", true.into()),
            ]),
            editable_fields: vec![
                field("logo", "Logo", FieldKind::Image),
                field("links", "Links", FieldKind::List),
                field("sticky", "Sticky", FieldKind::Toggle),
            ],
            default_children: None,
        },
        BlockType::ProductList => BlockSchema {
            default_props: props([
                ("title", rich("Товары", "Products", "Mahsulotlar")),
                ("limit", 8_i64.into()),
                ("showPrices", true.into()),
            ]),
            editable_fields: vec![
                field("title", "Title", FieldKind::RichText),
                field("limit", "Limit", FieldKind::Number),
                field("showPrices", "Show prices", FieldKind::Toggle),
            ],
            default_children: None,
        },
        BlockType::Footer => BlockSchema {
            default_props: props([
                ("copyright", rich("Все права защищены", "All rights reserved", "Barcha huquqlar himoyalangan")),
                ("links", PropValue::List(Vec::new())),
            ]),
            editable_fields: vec![
                field("copyright", "Copyright", FieldKind::RichText),
                field("links", "Links", FieldKind::List),
            ],
            default_children: Some(vec![ChildSeed::new(ComponentType::Text).content_from("copyright")]),
        },
        BlockType::FooterMinimal => BlockSchema {
            default_props: props([(
                "copyright",
                rich("Все права защищены", "All rights reserved", "Barcha huquqlar himoyalangan"),
            )]),
            editable_fields: vec![field("copyright", "Copyright", FieldKind::RichText)],
            default_children: Some(Vec::new()),
        },
        BlockType::ProductDetail | BlockType::ProductDetailGallery => BlockSchema {
            default_props: props([
                ("showGallery", (block_type == BlockType::ProductDetailGallery).into()),
                ("showReviews", true.into()),
                ("addToCart", rich_button("В корзину", "Add to cart", "Savatga", "#cart")),
            ]),
            editable_fields: vec![
                field("showReviews", "Show reviews", FieldKind::Toggle),
                field("addToCart", "Cart button", FieldKind::RichButton),
            ],
            default_children: None,
        },
    }
}

pub(crate) fn component_schema(component_type: ComponentType) -> ComponentSchema {
    match component_type {
        ComponentType::Text => ComponentSchema {
            default_props: props([("content", rich("Новый текст", "New text", "Yangi matn"))]),
            default_style: style([
                ("fontSize", json!("16px")),
                ("fontWeight", json!("400")),
                ("color", json!("inherit")),
                ("textAlign", json!("left")),
            ]),
        },
        ComponentType::Button => ComponentSchema {
            default_props: props([("content", rich_button("Кнопка", "Button", "Tugma", "#"))]),
            default_style: style([("variant", json!("primary")), ("size", json!("md"))]),
        },
        ComponentType::Image => ComponentSchema {
            default_props: props([("src", "".into()), ("alt", "".into())]),
            default_style: style([("objectFit", json!("cover")), ("width", json!("100%"))]),
        },
        ComponentType::Row => ComponentSchema {
            default_props: props([("gap", 16_i64.into()), ("align", "center".into())]),
            default_style: style([
                ("display", json!("flex")),
                ("flexDirection", json!("row")),
                ("flexWrap", json!("wrap")),
                ("alignItems", json!("center")),
                ("gap", json!("16px")),
            ]),
        },
    }
}
