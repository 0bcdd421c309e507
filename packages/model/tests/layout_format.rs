//! Persisted layout format tests

use shopfront_model::{BlockType, ComponentType, Document, Language, PropValue, PropsExt};

const STORED: &str = r##"[
    {
        "id": "block-1",
        "type": "hero",
        "props": {
            "title": {"ru": "Новая коллекция", "en": "New collection", "uz": "Yangi kolleksiya"},
            "backgroundImage": "/uploads/hero.jpg"
        },
        "children": [
            {
                "id": "row-1",
                "type": "row",
                "props": {"gap": 16, "align": "center"},
                "style": {"justifyContent": "flex-start"},
                "children": [
                    {
                        "id": "text-1",
                        "type": "text",
                        "props": {"content": {"en": "Autumn sale", "style": {"color": "#fff"}}},
                        "style": {"fontSize": "32px"}
                    },
                    {
                        "id": "button-1",
                        "type": "button",
                        "props": {"content": {"ru": "Купить", "href": "/catalog"}},
                        "style": {"variant": "primary", "size": "lg"}
                    }
                ]
            },
            {
                "id": "image-1",
                "type": "image",
                "props": {"src": "/uploads/model.png", "alt": "Model"},
                "style": {"objectFit": "cover"}
            }
        ]
    },
    {
        "id": "block-2",
        "type": "product-list",
        "props": {"title": "Bestsellers", "limit": 8, "categories": ["shoes", "bags"]}
    }
]"##;

#[test]
fn test_stored_layout_round_trips() {
    let doc = Document::from_json(STORED).unwrap();
    assert!(doc.validate().is_ok());

    let original: serde_json::Value = serde_json::from_str(STORED).unwrap();
    assert_eq!(doc.to_value().unwrap(), original);
}

#[test]
fn test_stored_layout_reads_typed_fields() {
    let doc = Document::from_json(STORED).unwrap();

    let hero = doc.block("block-1").unwrap();
    assert_eq!(hero.block_type, BlockType::Hero);
    assert_eq!(
        hero.props.get_rich("title").unwrap().resolve(Language::Uz, ""),
        "Yangi kolleksiya"
    );

    let row = &hero.children()[0];
    assert_eq!(row.component_type, ComponentType::Row);
    let button = &row.children()[1];
    let content = button.props.get_rich("content").unwrap();
    assert_eq!(content.href(), Some("/catalog"));
    assert_eq!(content.resolve(Language::En, "Buy"), "Купить");

    let list = doc.block("block-2").unwrap();
    assert!(list.is_legacy());
    assert_eq!(list.props.get_f64("limit"), Some(8.0));
    assert_eq!(
        list.props.get_list("categories"),
        Some(&[PropValue::from("shoes"), PropValue::from("bags")][..])
    );
}

#[test]
fn test_unknown_block_type_is_rejected() {
    let result = Document::from_json(r#"[{"id": "b", "type": "carousel-3d", "props": {}}]"#);
    assert!(result.is_err());
}
