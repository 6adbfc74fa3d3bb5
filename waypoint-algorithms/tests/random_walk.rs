use rand::{rngs::StdRng, SeedableRng};
use waypoint_algorithms::*;
use waypoint_graph::*;

fn grid_graph() -> Graph {
    // 3x3 grid, node "r,c"
    let mut edges = Vec::new();
    for r in 0..3 {
        for c in 0..3 {
            if c + 1 < 3 {
                edges.push((format!("{},{}", r, c), format!("{},{}", r, c + 1), 1.0 + r as f64));
            }
            if r + 1 < 3 {
                edges.push((format!("{},{}", r, c), format!("{},{}", r + 1, c), 1.0 + c as f64));
            }
        }
    }
    edges.into_iter().collect()
}

fn assert_walkable(graph: &Graph, query: &RouteQuery, path: &[NodeId]) {
    assert_eq!(path.first(), Some(&query.start));
    assert_eq!(path.last(), Some(&query.goal));
    assert!(path_cost(graph, path).is_finite());
    if let Some(avoid) = query.avoid {
        assert!(!path.contains(&avoid));
    }
    let mut seen = path.to_vec();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), path.len(), "walk revisited a node");
}

#[test]
fn test_walk_reaches_goal() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "0,0", "2,2", Some("1,1")).unwrap();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng).unwrap();
        assert_walkable(&g, &q, &path);
    }
}

#[test]
fn test_shared_policy_reaches_goal() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "0,0", "2,2", Some("1,1")).unwrap();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generate_random_path(&g, &q, WalkPolicy::Shared, &mut rng).unwrap();
        assert_walkable(&g, &q, &path);
    }
}

#[test]
fn test_same_seed_same_walk() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "0,0", "2,2", None).unwrap();
    let walk = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng)
    };
    assert_eq!(walk(7), walk(7));
    assert_eq!(walk(12345), walk(12345));
}

#[test]
fn test_walks_differ_across_seeds() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "0,0", "2,2", None).unwrap();
    let walks: Vec<_> = (0..20)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng).unwrap()
        })
        .collect();
    assert!(walks.iter().any(|w| w != &walks[0]));
}

#[test]
fn test_start_is_goal() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "1,1", "1,1", None).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let path = generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng).unwrap();
    assert_eq!(g.labels_of(&path), vec!["1,1"]);
}

#[test]
fn test_avoided_start_has_no_walk() {
    let g = grid_graph();
    let q = RouteQuery::from_labels(&g, "0,0", "2,2", Some("0,0")).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng).is_none());
}

#[test]
fn test_goal_behind_avoided_node() {
    let g: Graph = [("A", "B", 1.0), ("B", "C", 1.0), ("A", "D", 1.0)]
        .into_iter()
        .collect();
    let q = RouteQuery::from_labels(&g, "A", "C", Some("B")).unwrap();
    for policy in [WalkPolicy::PathLocal, WalkPolicy::Shared] {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_random_path(&g, &q, policy, &mut rng).is_none());
    }
}

#[test]
fn test_backtracks_out_of_dead_ends() {
    // Many dead-end branches off the start; only one leads to the goal.
    let mut edges: Vec<(String, String, f64)> = (0..10)
        .map(|i| ("S".to_string(), format!("dead{}", i), 1.0))
        .collect();
    edges.push(("S".to_string(), "M".to_string(), 1.0));
    edges.push(("M".to_string(), "G".to_string(), 1.0));
    let g: Graph = edges.into_iter().collect();
    let q = RouteQuery::from_labels(&g, "S", "G", None).unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let path = generate_random_path(&g, &q, WalkPolicy::PathLocal, &mut rng).unwrap();
        assert_eq!(g.labels_of(&path), vec!["S", "M", "G"]);
    }
}

#[test]
fn test_walk_policy_serde() {
    assert_eq!(
        serde_json::to_string(&WalkPolicy::PathLocal).unwrap(),
        "\"path_local\""
    );
    assert_eq!(
        serde_json::from_str::<WalkPolicy>("\"shared\"").unwrap(),
        WalkPolicy::Shared
    );
    assert_eq!(WalkPolicy::default(), WalkPolicy::PathLocal);
}
