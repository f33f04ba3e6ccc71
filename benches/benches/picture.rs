// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vellum_picture::{Canvas, Color, Matrix, Paint, Path, Picture, Rect};
use vellum_player_ref::RefPlayer;

fn record_grid(canvas: &mut Canvas, cells: usize, path: &Path, paint: &Paint) {
    for i in 0..cells {
        canvas.save();
        canvas.concat(&Matrix::translation((i % 64) as f32 * 8.0, (i / 64) as f32 * 8.0));
        canvas.draw_path(path, paint);
        canvas.restore();
    }
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("vellum_picture_matrix");
    let chain: Vec<Matrix> = (0..64)
        .map(|i| Matrix::rotation_degrees_about(i as f32 * 5.0, 3.0, 4.0).post_concat(&Matrix::scale(1.01, 0.99)))
        .collect();

    group.bench_function("pre_concat_chain(64)", |b| {
        b.iter(|| {
            black_box(
                chain
                    .iter()
                    .fold(Matrix::IDENTITY, |acc, m| acc.pre_concat(m)),
            )
        });
    });

    let rect = Rect::new(-1.0, -2.0, 3.0, 4.0);
    group.bench_function("map_rect", |b| {
        b.iter(|| black_box(chain[17].map_rect(black_box(&rect))));
    });

    group.finish();
}

fn bench_canvas(c: &mut Criterion) {
    let mut group = c.benchmark_group("vellum_picture_canvas");
    group.sample_size(50);

    let mut path = Path::new();
    path.add_round_rect(Rect::from_xywh(0.0, 0.0, 6.0, 6.0), 1.0, 1.0);
    let paint = Paint::fill(Color::WHITE);

    for &cells in &[256_usize, 4_096] {
        let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 512.0, 512.0));
        group.bench_function(format!("record_and_end(cells={cells})"), |b| {
            b.iter(|| {
                record_grid(&mut canvas, cells, &path, &paint);
                black_box(canvas.end_recording())
            });
        });

        let picture: Picture = {
            let mut canvas = Canvas::new(Rect::new(0.0, 0.0, 512.0, 512.0));
            record_grid(&mut canvas, cells, &path, &paint);
            canvas.end_recording()
        };
        group.bench_function(format!("ref_player(cells={cells})"), |b| {
            b.iter(|| {
                let mut player = RefPlayer::new();
                player.play(&picture);
                black_box(player.events().len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matrix, bench_canvas);
criterion_main!(benches);
