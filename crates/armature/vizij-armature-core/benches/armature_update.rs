use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vizij_armature_core::{Armature, ArmatureData};

/// A chain of `depth` bones, each `fan` extra leaves per link. Every bone
/// carries a one-unit translation so recomputation does real work.
fn build_armature(depth: usize, fan: usize) -> Armature {
    let mut arm = Armature::new(ArmatureData::new("bench"));
    let mut parent = arm.create_bone("spine0");
    arm.bone_mut(parent).unwrap().tween_data_mut().x = 1.0;
    for i in 1..depth {
        let link = arm.create_bone(&format!("spine{i}"));
        arm.bone_mut(link).unwrap().tween_data_mut().x = 1.0;
        arm.add_child_bone(parent, link);
        for j in 0..fan {
            let leaf = arm.create_bone(&format!("leaf{i}_{j}"));
            arm.bone_mut(leaf).unwrap().tween_data_mut().y = 1.0;
            arm.add_child_bone(link, leaf);
        }
        parent = link;
    }
    arm
}

fn bench_update(c: &mut Criterion) {
    let mut arm = build_armature(16, 3);
    arm.update(1.0 / 60.0);
    c.bench_function("update_chain16_fan3_dirty_root", |b| {
        b.iter(|| {
            let root = arm.roots()[0];
            arm.bone_mut(root).unwrap().set_transform_dirty(true);
            arm.update(black_box(1.0 / 60.0));
        })
    });

    let mut clean = build_armature(16, 3);
    clean.update(1.0 / 60.0);
    c.bench_function("update_chain16_fan3_clean", |b| {
        b.iter(|| clean.update(black_box(1.0 / 60.0)))
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
