use criterion::{Criterion, criterion_group, criterion_main};
use std::{hint::black_box, time::Duration};
use subway::prelude::*;

const SIZE: u64 = 60;

// SIZE horizontal and SIZE vertical lines crossing on a square grid
fn grid_network() -> (Network, Vec<Section>) {
    let station = |x: u64, y: u64| StationId::new(y * SIZE + x + 1);
    let mut sections = Vec::new();
    for row in 0..SIZE {
        for x in 0..SIZE - 1 {
            let id = SectionId::new(sections.len() as u64 + 1);
            let distance = Distance::from_kilometers(((row + x) % 7 + 1) as u32);
            sections.push(Section::new(
                id,
                LineId::new(row + 1),
                station(x, row),
                station(x + 1, row),
                distance,
            ));
        }
    }
    for column in 0..SIZE {
        for y in 0..SIZE - 1 {
            let id = SectionId::new(sections.len() as u64 + 1);
            let distance = Distance::from_kilometers(((column * y) % 5 + 1) as u32);
            sections.push(Section::new(
                id,
                LineId::new(SIZE + column + 1),
                station(column, y),
                station(column, y + 1),
                distance,
            ));
        }
    }
    let network = Network::new().with_sections(&sections);
    (network, sections)
}

fn corner_to_corner(network: &Network) {
    let from = StationId::new(1);
    let to = StationId::new(SIZE * SIZE);
    let _ = black_box(network.shortest_path(from, to));
}

fn build_and_solve(sections: &[Section]) {
    let network = Network::new().with_sections(sections);
    let _ = black_box(network.shortest_distance(StationId::new(1), StationId::new(SIZE * SIZE / 2)));
}

fn sort_line(sections: &[Section]) {
    let line: Vec<Section> = sections
        .iter()
        .filter(|section| section.line_id == LineId::new(1))
        .rev()
        .copied()
        .collect();
    let _ = black_box(Topology::new(line));
}

fn criterion_benchmark(c: &mut Criterion) {
    let (network, sections) = grid_network();

    let mut group = c.benchmark_group("Network");
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Corner to corner path", |b| {
        b.iter(|| corner_to_corner(&network))
    });

    group.bench_function("Build and solve", |b| b.iter(|| build_and_solve(&sections)));

    group.bench_function("Sort line", |b| b.iter(|| sort_line(&sections)));

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
