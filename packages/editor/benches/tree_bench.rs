use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shopfront_editor::{find, plan_drop, Mutation};
use shopfront_model::{Block, BlockType, Component, ComponentType, Document};

/// `blocks` hero blocks, each with `rows` rows of four text leaves
fn page(blocks: usize, rows: usize) -> Document {
    (0..blocks)
        .map(|b| {
            let children = (0..rows)
                .map(|r| {
                    let leaves = (0..4)
                        .map(|c| Component::new(format!("c-{}-{}-{}", b, r, c), ComponentType::Text))
                        .collect();
                    Component::new(format!("r-{}-{}", b, r), ComponentType::Row).with_children(leaves)
                })
                .collect();
            Block::new(format!("b-{}", b), BlockType::Hero).with_children(children)
        })
        .collect()
}

fn find_last_node(c: &mut Criterion) {
    let doc = page(40, 10);

    c.bench_function("find_last_node", |b| {
        b.iter(|| find(black_box(&doc), black_box("c-39-9-3")))
    });
}

fn update_nested_component(c: &mut Criterion) {
    let doc = page(40, 10);
    let mutation = Mutation::RemoveComponent {
        block_id: "b-20".to_string(),
        component_id: "c-20-5-2".to_string(),
    };

    c.bench_function("update_nested_component", |b| {
        b.iter(|| mutation.apply(black_box(&doc)))
    });
}

fn plan_cross_block_drop(c: &mut Criterion) {
    let doc = page(40, 10);

    c.bench_function("plan_cross_block_drop", |b| {
        b.iter(|| plan_drop(black_box(&doc), "c-0-0-0", "c-39-9-3"))
    });
}

criterion_group!(
    benches,
    find_last_node,
    update_nested_component,
    plan_cross_block_drop
);
criterion_main!(benches);
