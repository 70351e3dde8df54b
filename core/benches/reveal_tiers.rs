use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use cubesweeper_core::{CellKind, Coord3, Difficulty, Session, SessionOptions};

/// Reveals every empty cell of a fresh game, cascades and pulse scans included.
fn bench_clear_empty(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear_empty");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &difficulty,
            |b, &difficulty| {
                b.iter_batched(
                    || {
                        let session = Session::new_game(difficulty, SessionOptions::with_seed(9)).unwrap();
                        let empties: Vec<Coord3> = session
                            .grid()
                            .iter()
                            .filter(|(_, cell)| cell.kind() == CellKind::Empty)
                            .map(|(coords, _)| coords)
                            .collect();
                        (session, empties)
                    },
                    |(mut session, empties)| {
                        for coords in empties {
                            black_box(session.reveal(coords).unwrap());
                        }
                        session
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_clear_empty);
criterion_main!(benches);
