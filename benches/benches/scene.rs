// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use vellum_picture::{Color, Matrix, Paint, Path, Point, Rect};
use vellum_scene::{Drawable, DrawableId, EditMode, PaintEditor, PaintSlot, Scene, Walker};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

/// A container tree with `leaves` path drawables sharing `palette` fill
/// paints, `uses` extra `Use` edges pointing back at random earlier nodes
/// (cycles included), and a group every `fanout` leaves.
fn build_scene(leaves: usize, fanout: usize, palette: usize, uses: usize, seed: u64) -> (Scene, DrawableId) {
    let mut rng = Lcg::new(seed);
    let mut scene = Scene::new();
    let paints: Vec<_> = (0..palette)
        .map(|i| {
            let v = u8::try_from(i % 256).unwrap_or(0);
            scene.add_paint(Paint::fill(Color::from_rgb8(v, 255 - v, 0)))
        })
        .collect();

    let mut groups = Vec::new();
    let mut current = Vec::new();
    for i in 0..leaves {
        let mut path = Path::new();
        path.add_rect(Rect::from_xywh((i % 64) as f32 * 8.0, (i / 64) as f32 * 8.0, 6.0, 6.0));
        let paint = paints[rng.gen_range_usize(paints.len())];
        current.push(scene.insert(Drawable::path(path).with_fill(paint)));
        if current.len() == fanout {
            groups.push(scene.insert(Drawable::container(std::mem::take(&mut current))));
        }
    }
    if !current.is_empty() {
        groups.push(scene.insert(Drawable::container(current)));
    }
    let root = scene.insert(Drawable::container(groups.clone()));

    for _ in 0..uses {
        let target = DrawableId(u32::try_from(rng.gen_range_usize(scene.len())).unwrap_or(0));
        let link = scene.insert(
            Drawable::use_of(Some(target)).with_transform(Matrix::translation(1.0, 1.0)),
        );
        let parent = groups[rng.gen_range_usize(groups.len())];
        scene.push_child(parent, link);
    }
    (scene, root)
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("vellum_scene_walk");
    group.sample_size(50);

    for &(leaves, uses) in &[(1_024_usize, 0_usize), (1_024, 64), (16_384, 0), (16_384, 1_024)] {
        let (scene, root) = build_scene(leaves, 16, 8, uses, 0x5CE7_0000_0000_0001);

        group.bench_function(format!("traverse(n={leaves},uses={uses})"), |b| {
            b.iter(|| black_box(scene.traverse(&[root]).count()));
        });

        let mut walker = Walker::with_capacity(scene.len());
        let mut out = Vec::with_capacity(scene.len());
        group.bench_function(format!("walker_reuse(n={leaves},uses={uses})"), |b| {
            b.iter(|| {
                out.clear();
                walker.collect_into(&scene, &[root], &mut out);
                black_box(out.len());
            });
        });
    }

    group.finish();
}

fn bench_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("vellum_scene_edit");
    group.sample_size(50);

    for &leaves in &[1_024_usize, 16_384] {
        for mode in [EditMode::InPlace, EditMode::CloneOnWrite] {
            group.bench_function(format!("update_fills(n={leaves},mode={mode:?})"), |b| {
                b.iter_batched(
                    || build_scene(leaves, 16, 8, 64, 0x5CE7_0000_0000_0002),
                    |(mut scene, root)| {
                        let mut editor = PaintEditor::new();
                        let n = editor.update(
                            &mut scene,
                            &[root],
                            PaintSlot::Fill,
                            mode,
                            |p| p.color.components[0] > 0.5,
                            |p| p.color = Color::BLACK,
                        );
                        black_box(n)
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("vellum_scene_record");
    group.sample_size(30);

    for &leaves in &[1_024_usize, 16_384] {
        let (mut scene, root) = build_scene(leaves, 16, 8, 0, 0x5CE7_0000_0000_0003);
        let cull = Rect::new(0.0, 0.0, 512.0, 2_048.0);

        group.bench_function(format!("record(n={leaves})"), |b| {
            b.iter(|| black_box(scene.record(root, cull)));
        });

        group.bench_function(format!("update_bounds(n={leaves})"), |b| {
            b.iter(|| black_box(scene.update_bounds(root)));
        });

        scene.update_bounds(root);
        group.bench_function(format!("hit_test(n={leaves})"), |b| {
            b.iter(|| black_box(scene.hit_test(&[root], Point::new(100.0, 100.0))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_walk, bench_edit, bench_record);
criterion_main!(benches);
