use hashgraph::{int_hash, string_hash, EdgeProperties, Graph, GraphError, Traits};
use std::collections::HashSet;

fn named(traits: Traits, names: &[&str]) -> Graph<String, String> {
    let mut g = Graph::new(string_hash, traits);
    for name in names {
        g.add_vertex(*name).unwrap();
    }
    g
}

fn collect_dfs(g: &Graph<String, String>, start: &str) -> HashSet<String> {
    let mut seen = HashSet::new();
    g.dfs(start, |id| {
        seen.insert(id.clone());
        false
    })
    .unwrap();
    seen
}

#[test]
fn test_directed_acyclic_chain() {
    let mut g = named(Traits::new().directed().with_cycle_prevention(), &["A", "B", "C"]);

    g.add_edge("A", "B").unwrap();
    g.add_edge("B", "C").unwrap();

    let err = g.add_edge("C", "A").unwrap_err();
    assert_eq!(
        err,
        GraphError::WouldCreateCycle("\"C\"".to_string(), "\"A\"".to_string())
    );
    assert!(g.edge("C", "A").is_none());

    let adjacency = g.adjacency_map();
    assert_eq!(adjacency.len(), 3);
    assert!(adjacency["A"].contains_key("B"));
    assert!(adjacency["B"].contains_key("C"));
    assert!(adjacency["C"].is_empty());

    let predecessors = g.predecessor_map();
    assert!(predecessors["A"].is_empty());
    assert_eq!(predecessors["C"]["B"].source, "B");

    assert_eq!(g.degree("B").unwrap(), 2);
    assert_eq!(g.size(), 2);
}

#[test]
fn test_undirected_edge_either_way() {
    let mut g = named(Traits::new(), &["X", "Y"]);
    g.add_edge("X", "Y").unwrap();

    let err = g.add_edge("Y", "X").unwrap_err();
    assert!(matches!(err, GraphError::EdgeAlreadyExists(_, _)));

    let forward = g.edge("X", "Y").unwrap();
    let backward = g.edge("Y", "X").unwrap();
    assert_eq!((forward.source.as_str(), forward.target.as_str()), ("X", "Y"));
    assert_eq!((backward.source.as_str(), backward.target.as_str()), ("Y", "X"));

    let adjacency = g.adjacency_map();
    assert!(adjacency["X"].contains_key("Y"));
    assert!(adjacency["Y"].contains_key("X"));
    assert_eq!(g.predecessor_map(), adjacency);
    assert_eq!(g.size(), 1);
}

#[test]
fn test_traversals_reach_component() {
    let mut g = named(Traits::new().directed(), &["A", "B", "C", "D", "E"]);
    g.add_edge("A", "B").unwrap();
    g.add_edge("A", "C").unwrap();
    g.add_edge("C", "D").unwrap();
    g.add_edge("D", "A").unwrap();

    let reached = collect_dfs(&g, "A");
    let expected: HashSet<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    assert_eq!(reached, expected);

    let mut order = Vec::new();
    g.bfs("A", |id| {
        order.push(id.clone());
        false
    })
    .unwrap();
    assert_eq!(order[0], "A");
    assert_eq!(order.len(), 4);
    assert_eq!(order[3], "D");

    assert_eq!(collect_dfs(&g, "E").len(), 1);
}

#[test]
fn test_sorted_traversals_are_deterministic() {
    let mut g: Graph<i64, i64> = Graph::new(int_hash, Traits::new());
    for id in 1..=6 {
        g.add_vertex(id).unwrap();
    }
    for (s, t) in [(1, 2), (1, 3), (2, 4), (3, 5), (4, 6)] {
        g.add_edge(s, t).unwrap();
    }

    let mut dfs = Vec::new();
    g.dfs_sorted(&1, |id| {
        dfs.push(*id);
        false
    })
    .unwrap();
    assert_eq!(dfs, vec![1, 2, 4, 6, 3, 5]);

    let mut bfs = Vec::new();
    g.bfs_sorted(&1, |id| {
        bfs.push(*id);
        false
    })
    .unwrap();
    assert_eq!(bfs, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_visit_can_stop_early() {
    let mut g: Graph<i64, i64> = Graph::new(int_hash, Traits::new().directed());
    for id in 0..10 {
        g.add_vertex(id).unwrap();
    }
    for id in 0..9 {
        g.add_edge(id, id + 1).unwrap();
    }

    let mut visited = 0;
    g.dfs(&0, |id| {
        visited += 1;
        *id == 4
    })
    .unwrap();
    assert_eq!(visited, 5);
}

#[test]
fn test_clone_is_independent() {
    let mut g = named(Traits::new().directed(), &["A", "B"]);
    g.add_edge("A", "B").unwrap();

    let mut copy = g.clone();
    copy.add_vertex("C").unwrap();
    copy.add_edge("B", "C").unwrap();
    copy.remove_edge("A", "B").unwrap();

    assert_eq!(g.order(), 2);
    assert!(g.edge("A", "B").is_some());
    assert!(g.edge("B", "C").is_none());
    assert!(matches!(g.vertex("C"), Err(GraphError::VertexNotFound(_))));

    assert_eq!(copy.order(), 3);
    assert!(copy.edge("A", "B").is_none());
    assert!(copy.edge("B", "C").is_some());
}

#[test]
fn test_unknown_vertices_rejected() {
    let mut g = named(Traits::new().directed(), &["A"]);

    assert_eq!(
        g.add_edge("A", "Z").unwrap_err(),
        GraphError::VertexNotFound("\"Z\"".to_string())
    );
    assert!(matches!(g.degree("Z"), Err(GraphError::VertexNotFound(_))));
    assert!(matches!(g.dfs("Z", |_| false), Err(GraphError::VertexNotFound(_))));
    assert!(matches!(g.bfs("Z", |_| false), Err(GraphError::VertexNotFound(_))));
    assert!(matches!(g.remove_vertex("Z"), Err(GraphError::VertexNotFound(_))));
    assert!(matches!(
        g.remove_edge("A", "Z"),
        Err(GraphError::EdgeNotFound(_, _))
    ));
    assert_eq!(g.size(), 0);
}

#[test]
fn test_self_loops() {
    let mut acyclic = named(Traits::new().directed().with_cycle_prevention(), &["A"]);
    assert!(matches!(
        acyclic.add_edge("A", "A"),
        Err(GraphError::WouldCreateCycle(_, _))
    ));

    let mut directed = named(Traits::new().directed(), &["A"]);
    directed.add_edge("A", "A").unwrap();
    assert_eq!(directed.degree("A").unwrap(), 2);

    let mut undirected = named(Traits::new(), &["A"]);
    undirected.add_edge("A", "A").unwrap();
    assert_eq!(undirected.degree("A").unwrap(), 1);
    assert_eq!(undirected.size(), 1);
}

#[test]
fn test_undirected_cycle_prevention() {
    let mut g: Graph<i64, i64> = Graph::new(int_hash, Traits::new().with_cycle_prevention());
    for id in 1..=4 {
        g.add_vertex(id).unwrap();
    }
    g.add_edge(1, 2).unwrap();
    g.add_edge(2, 3).unwrap();
    g.add_edge(3, 4).unwrap();

    assert!(matches!(g.add_edge(4, 1), Err(GraphError::WouldCreateCycle(_, _))));
    assert!(matches!(g.add_edge(1, 3), Err(GraphError::WouldCreateCycle(_, _))));
    assert_eq!(g.size(), 3);
}

#[test]
fn test_remove_vertex_cascades() {
    let mut g = named(Traits::new().directed(), &["A", "B", "C"]);
    g.add_edge_with_properties("A", "B", EdgeProperties::new().with_weight(7))
        .unwrap();
    g.add_edge("B", "C").unwrap();
    g.add_edge("C", "A").unwrap();

    g.remove_vertex("B").unwrap();

    assert_eq!(g.order(), 2);
    assert_eq!(g.size(), 1);
    let adjacency = g.adjacency_map();
    assert!(!adjacency.contains_key("B"));
    assert!(adjacency["A"].is_empty());
    assert_eq!(g.degree("C").unwrap(), 1);

    // The freed identifier can be reused.
    g.add_vertex("B").unwrap();
    assert_eq!(g.degree("B").unwrap(), 0);
}

#[derive(Clone, Debug, PartialEq)]
struct Host {
    name: String,
    zone: String,
}

#[test]
fn test_capturing_identity_closure() {
    let tenant = String::from("acme");
    let mut g: Graph<String, Host> = Graph::new(
        move |host: &Host| format!("{}/{}/{}", tenant, host.zone, host.name),
        Traits::new().directed().with_cycle_prevention(),
    );

    let host = |name: &str, zone: &str| Host {
        name: name.to_string(),
        zone: zone.to_string(),
    };
    g.add_vertex(host("web", "eu")).unwrap();
    g.add_vertex(host("web", "us")).unwrap();
    g.add_vertex(host("db", "eu")).unwrap();

    // Same name in another zone is a different vertex; same zone is not.
    assert!(matches!(
        g.add_vertex(host("web", "eu")),
        Err(GraphError::VertexAlreadyExists(_))
    ));
    assert_eq!(g.order(), 3);

    g.add_edge("acme/eu/web", "acme/eu/db").unwrap();
    assert_eq!(g.vertex("acme/us/web").unwrap(), host("web", "us"));

    let copy = g.clone();
    assert!(copy.edge("acme/eu/web", "acme/eu/db").is_some());
}
