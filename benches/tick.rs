use criterion::{black_box, criterion_group, criterion_main, Criterion};
use winit::event::VirtualKeyCode;

use data_duel::{game::DataDuel, renderer::RecordingSurface, scheduler::ManualScheduler, GameConfig};

fn tick_benchmark(c: &mut Criterion) {
    let config = GameConfig { seed: Some(42), ..GameConfig::default() };

    c.bench_function("tick with a crowded field", |b| {
        let mut surface = RecordingSurface::new();
        let mut scheduler = ManualScheduler::new();
        let mut game = DataDuel::new(config.clone()).unwrap();
        game.mount(&mut surface);
        game.toggle(&mut scheduler);
        game.key_down(VirtualKeyCode::D);
        game.key_down(VirtualKeyCode::Up);

        // roughly a minute of play
        for _ in 0..3_600 {
            surface.clear();
            game.tick(&mut surface);
        }

        b.iter(|| {
            surface.clear();
            game.tick(black_box(&mut surface));
        });
    });
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
