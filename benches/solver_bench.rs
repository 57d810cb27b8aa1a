//! Benchmarks for the frame solver

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame2d_solver::prelude::*;

const E: f64 = 200e9;

fn create_cantilever_model() -> FrameModel {
    let mut model = FrameModel::new();

    model.add_node("N1", 0.0, 0.0).unwrap();
    model.add_node("N2", 10.0, 0.0).unwrap();

    // 0.3 x 0.5 rectangle
    model.add_frame("M1", "N1", "N2", E * 0.15, E * 0.003125).unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model.add_nodal_load("N2", NodeLoad::force(0.0, -10000.0)).unwrap();

    model
}

fn create_multi_story_frame(stories: usize, bays: usize) -> FrameModel {
    let mut model = FrameModel::new();

    let story_height = 3.5;
    let bay_width = 6.0;

    // Create nodes
    for story in 0..=stories {
        for bay in 0..=bays {
            let name = format!("N{}_{}", story, bay);
            let x = bay as f64 * bay_width;
            let y = story as f64 * story_height;
            model.add_node(&name, x, y).unwrap();
        }
    }

    // Create columns, 0.4 x 0.4
    for story in 0..stories {
        for bay in 0..=bays {
            let name = format!("Col{}_{}", story, bay);
            let i_node = format!("N{}_{}", story, bay);
            let j_node = format!("N{}_{}", story + 1, bay);
            model
                .add_frame(&name, &i_node, &j_node, E * 0.16, E * 0.4_f64.powi(4) / 12.0)
                .unwrap();
        }
    }

    // Create beams, 0.3 x 0.6, with floor load
    for story in 1..=stories {
        for bay in 0..bays {
            let name = format!("Beam{}_{}", story, bay);
            let i_node = format!("N{}_{}", story, bay);
            let j_node = format!("N{}_{}", story, bay + 1);
            model
                .add_frame(&name, &i_node, &j_node, E * 0.18, E * 0.3 * 0.6_f64.powi(3) / 12.0)
                .unwrap();
            model
                .add_global_member_load(&name, MemberLoadKind::Uniform, 0.0, -25000.0)
                .unwrap();
        }
    }

    // Add supports at base
    for bay in 0..=bays {
        let name = format!("N0_{}", bay);
        model.add_support(&name, Support::fixed()).unwrap();
    }

    // Lateral loads at each floor
    for story in 1..=stories {
        let name = format!("N{}_0", story);
        model.add_nodal_load(&name, NodeLoad::force(5000.0, 0.0)).unwrap();
    }

    model
}

fn benchmark_cantilever(c: &mut Criterion) {
    c.bench_function("cantilever_linear", |b| {
        let model = create_cantilever_model();
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_small_frame(c: &mut Criterion) {
    c.bench_function("frame_3story_2bay_linear", |b| {
        let model = create_multi_story_frame(3, 2);
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_medium_frame(c: &mut Criterion) {
    c.bench_function("frame_10story_5bay_linear", |b| {
        let model = create_multi_story_frame(10, 5);
        b.iter(|| black_box(model.analyze().unwrap()))
    });
}

fn benchmark_json_contract(c: &mut Criterion) {
    let json = r#"{
        "nodes": [{"id":"a","x":0,"y":0},{"id":"b","x":4,"y":0},{"id":"c","x":2,"y":2}],
        "members": [
            {"id":"ab","startNodeId":"a","endNodeId":"b","type":"truss"},
            {"id":"ac","startNodeId":"a","endNodeId":"c","type":"truss"},
            {"id":"bc","startNodeId":"b","endNodeId":"c","type":"truss"}
        ],
        "supports": [{"nodeId":"a","type":"pin"},{"nodeId":"b","type":"roller"}],
        "loads": [{"type":"nodal_point","nodeId":"c","magnitudeX":0,"magnitudeY":-10000}]
    }"#;
    c.bench_function("truss_json_roundtrip", |b| {
        b.iter(|| black_box(analyze_json(black_box(json))))
    });
}

criterion_group!(
    benches,
    benchmark_cantilever,
    benchmark_small_frame,
    benchmark_medium_frame,
    benchmark_json_contract,
);

criterion_main!(benches);
