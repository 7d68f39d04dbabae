use std::{collections::HashSet, fmt::Write as _, path::PathBuf};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::prelude::*;
use regcolor::{
    assign_registers, assign_registers_from_path, parser, verify, InterferenceGraph, Register,
};

const TEST_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/", "tests/graphs");

fn graph_file(name: &str) -> PathBuf {
    PathBuf::from(TEST_DIR).join(name)
}

fn random_label(rng: &mut StdRng) -> String {
    (0..12).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
}

/// Edge list in the generator's layout: every vertex first, then a random
/// sample of neighbors for each vertex.
fn random_edge_list(rng: &mut StdRng, num_vertices: usize, max_neighbors: usize) -> String {
    let mut labels = HashSet::new();
    while labels.len() < num_vertices {
        labels.insert(random_label(rng));
    }
    let mut labels: Vec<String> = labels.into_iter().collect();
    labels.sort();

    let mut src = String::new();
    for label in &labels {
        writeln!(src, "{}", label).unwrap();
    }
    for label in &labels {
        let n = rng.gen_range(0..=max_neighbors.min(num_vertices - 1));
        for other in labels.choose_multiple(rng, n) {
            writeln!(src, "{},{}", label, other).unwrap();
        }
    }
    src
}

fn random_graph(seed: u64, num_vertices: usize, max_neighbors: usize) -> InterferenceGraph<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let src = random_edge_list(&mut rng, num_vertices, max_neighbors);
    parser::load(src.as_bytes()).unwrap()
}

#[test]
fn test_simple_file() {
    let path = graph_file("simple.csv");

    let assignment = assign_registers_from_path(&path, 3).unwrap();
    let graph = regcolor::load(&path).unwrap();
    assert_eq!(graph.num_vertices(), 3);
    assert_eq!(graph.num_edges(), 3);
    assert!(verify::is_valid(&graph, 3, &assignment));

    let assignment = assign_registers_from_path(&path, 2).unwrap();
    assert!(assignment.is_empty());
    assert_eq!(
        verify::verify(&graph, 2, &assignment),
        Err(verify::VerifyError::Empty)
    );
}

#[test]
fn test_hexagon_file() {
    let path = graph_file("hexagon.csv");
    let graph = regcolor::load(&path).unwrap();

    let assignment = assign_registers_from_path(&path, 2).unwrap();
    assert!(verify::is_valid(&graph, 2, &assignment));

    assert!(assign_registers_from_path(&path, 1).unwrap().is_empty());
}

#[test]
fn test_malformed_file() {
    let err = regcolor::load(graph_file("malformed.csv")).unwrap_err();
    assert!(matches!(err, regcolor::Error::ParseError(ref e) if e.line() == 3));
}

#[test]
fn test_missing_file() {
    let err = assign_registers_from_path(graph_file("does_not_exist.csv"), 3).unwrap_err();
    assert!(matches!(err, regcolor::Error::Open { .. }));
}

#[test]
fn test_large_graph() {
    let graph = random_graph(7, 1000, 8);
    assert_eq!(graph.num_vertices(), 1000);
    assert_eq!(graph.vertices().count(), 1000);

    let bound = graph.max_degree() as Register + 1;
    let assignment = assign_registers(&graph, bound);
    assert_eq!(verify::verify(&graph, bound, &assignment), Ok(()));
}

#[test]
fn test_random_soundness() {
    (0..48u64).into_par_iter().for_each(|seed| {
        let graph = random_graph(seed, 40, 12);
        let bound = graph.max_degree() as Register + 1;

        for registers in 1..=bound {
            let assignment = assign_registers(&graph, registers);
            if assignment.is_empty() {
                assert!(registers < bound, "seed {}: failed within degree bound", seed);
                assert!(!verify::is_valid(&graph, registers, &assignment));
            } else {
                assert_eq!(
                    verify::verify(&graph, registers, &assignment),
                    Ok(()),
                    "seed {}, {} registers",
                    seed,
                    registers
                );
            }
        }
    });
}

#[test]
fn test_random_mutations_keep_invariants() {
    (0..32u64).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let labels: Vec<u32> = (0..20).collect();
        let mut graph = InterferenceGraph::new();

        for _ in 0..400 {
            let v = *labels.choose(&mut rng).unwrap();
            let w = *labels.choose(&mut rng).unwrap();
            match rng.gen_range(0..4) {
                0 => graph.add_vertex(v),
                1 => {
                    let before = graph.num_edges();
                    let known = graph.contains(&v) && graph.contains(&w);
                    let linked = known && graph.interferes(&v, &w).unwrap();
                    assert_eq!(graph.add_edge(&v, &w).is_ok(), known);
                    let added = usize::from(known && !linked && v != w);
                    assert_eq!(graph.num_edges(), before + added);
                }
                2 => {
                    let neighbors: Option<Vec<u32>> = graph
                        .neighbors(&v)
                        .ok()
                        .map(|neighbors| neighbors.iter().copied().collect());
                    if let Some(neighbors) = neighbors {
                        let degrees: Vec<usize> =
                            neighbors.iter().map(|n| graph.degree(n).unwrap()).collect();
                        let before = graph.num_edges();

                        graph.remove_vertex(&v).unwrap();

                        assert_eq!(graph.num_edges(), before - neighbors.len());
                        for (n, degree) in neighbors.iter().zip(degrees) {
                            assert_eq!(graph.degree(n).unwrap(), degree - 1);
                        }
                    } else {
                        assert!(graph.remove_vertex(&v).is_err());
                    }
                }
                _ => {
                    let before = graph.num_edges();
                    if graph.remove_edge(&v, &w).is_ok() {
                        assert_eq!(graph.num_edges(), before - 1);
                    } else {
                        assert_eq!(graph.num_edges(), before);
                    }
                }
            }

            let total: usize = graph.vertices().map(|v| graph.degree(v).unwrap()).sum();
            assert_eq!(graph.num_edges() * 2, total);
            for v in graph.vertices() {
                for w in graph.vertices() {
                    assert_eq!(
                        graph.interferes(v, w).unwrap(),
                        graph.interferes(w, v).unwrap()
                    );
                }
            }
        }
    });
}
