//! Phase 4 tests: Full integration (payload decorator over the core).
//!
//! A small trip planner keeps place names and road lengths in side tables
//! keyed by the ids the graph hands out, routes with Dijkstra and A*, and
//! persists everything next to a topology snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fringe_graph::graph::{GraphSnapshot, UndirectedGraph};
use fringe_graph::types::{EdgeId, GraphResult, VertexId};
use fringe_graph::{with_heuristic, SearchParams, ShortestPaths, WalkEngine};

// ==================== Decorator ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Place {
    name: String,
    x: f64,
    y: f64,
}

#[derive(Default)]
struct Atlas {
    graph: UndirectedGraph,
    places: BTreeMap<VertexId, Place>,
    roads: BTreeMap<EdgeId, f64>,
}

#[derive(Serialize, Deserialize)]
struct SavedAtlas {
    topology: GraphSnapshot,
    places: BTreeMap<VertexId, Place>,
    roads: BTreeMap<EdgeId, f64>,
}

impl Atlas {
    fn add_place(&mut self, name: &str, x: f64, y: f64) -> VertexId {
        let v = self.graph.add_vertex();
        self.places.insert(
            v,
            Place {
                name: name.to_string(),
                x,
                y,
            },
        );
        v
    }

    fn add_road(&mut self, a: VertexId, b: VertexId, length: f64) -> GraphResult<EdgeId> {
        let id = self.graph.add_edge(a, b)?;
        self.roads.insert(id, length);
        Ok(id)
    }

    fn close_road(&mut self, a: VertexId, b: VertexId) {
        if let Some(id) = self.graph.remove_edge(a, b) {
            self.roads.remove(&id);
        }
    }

    fn remove_place(&mut self, v: VertexId) {
        if self.graph.remove_vertex(v) {
            self.places.remove(&v);
            let graph = &self.graph;
            self.roads.retain(|id, _| graph.edge(*id).is_some());
        }
    }

    fn find(&self, name: &str) -> VertexId {
        self.places
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(&v, _)| v)
            .unwrap()
    }

    fn road_length(&self, a: VertexId, b: VertexId) -> f64 {
        self.graph
            .edge_id(a, b)
            .and_then(|id| self.roads.get(&id).copied())
            .unwrap_or(f64::INFINITY)
    }

    fn straight_line(&self, a: VertexId, b: VertexId) -> f64 {
        let (p, q) = (&self.places[&a], &self.places[&b]);
        ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt()
    }

    fn route(&self, from: &str, to: &str, astar: bool) -> (Vec<String>, f64) {
        let (source, target) = (self.find(from), self.find(to));
        let params = SearchParams::new(source).with_destination(target);
        let roads = |a: VertexId, b: VertexId| -> f64 { self.road_length(a, b) };

        let paths = if astar {
            let estimate = |v: VertexId| -> f64 { self.straight_line(v, target) };
            ShortestPaths::compute(&self.graph, &params, &with_heuristic(roads, estimate))
        } else {
            ShortestPaths::compute(&self.graph, &params, &roads)
        }
        .unwrap();

        let names = paths
            .path()
            .unwrap()
            .into_iter()
            .map(|v| self.places[&v].name.clone())
            .collect();
        (names, paths.distance(target))
    }

    fn save(&self) -> String {
        serde_json::to_string(&SavedAtlas {
            topology: self.graph.snapshot(),
            places: self.places.clone(),
            roads: self.roads.clone(),
        })
        .unwrap()
    }

    fn load(json: &str) -> GraphResult<Self> {
        let saved: SavedAtlas = serde_json::from_str(json).unwrap();
        Ok(Self {
            graph: UndirectedGraph::from_snapshot(saved.topology)?,
            places: saved.places,
            roads: saved.roads,
        })
    }
}

fn bay_area() -> Atlas {
    let mut atlas = Atlas::default();
    let berkeley = atlas.add_place("Berkeley", 0.0, 0.0);
    let oakland = atlas.add_place("Oakland", 3.0, -4.0);
    let sf = atlas.add_place("San Francisco", -10.0, 0.0);
    let san_jose = atlas.add_place("San Jose", 20.0, -40.0);
    let fremont = atlas.add_place("Fremont", 15.0, -25.0);

    atlas.add_road(berkeley, oakland, 5.0).unwrap();
    atlas.add_road(oakland, sf, 14.0).unwrap();
    atlas.add_road(berkeley, sf, 12.0).unwrap();
    atlas.add_road(oakland, fremont, 25.0).unwrap();
    atlas.add_road(fremont, san_jose, 17.0).unwrap();
    atlas.add_road(sf, san_jose, 50.0).unwrap();
    atlas
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ==================== Routing Tests ====================

#[test]
fn test_route_through_decorator() {
    let _ = env_logger::builder().is_test(true).try_init();
    let atlas = bay_area();

    let (route, length) = atlas.route("Berkeley", "San Jose", false);
    assert_eq!(route, names(&["Berkeley", "Oakland", "Fremont", "San Jose"]));
    assert_eq!(length, 47.0);

    let (route, length) = atlas.route("Berkeley", "San Jose", true);
    assert_eq!(route, names(&["Berkeley", "Oakland", "Fremont", "San Jose"]));
    assert_eq!(length, 47.0);
}

#[test]
fn test_closed_and_reopened_road() {
    let mut atlas = bay_area();
    let oakland = atlas.find("Oakland");
    let fremont = atlas.find("Fremont");
    let old_id = atlas.graph.edge_id(oakland, fremont).unwrap();

    atlas.close_road(fremont, oakland);
    let (route, length) = atlas.route("Berkeley", "San Jose", false);
    assert_eq!(route, names(&["Berkeley", "San Francisco", "San Jose"]));
    assert_eq!(length, 62.0);

    let new_id = atlas.add_road(oakland, fremont, 26.0).unwrap();
    assert!(new_id > old_id);
    assert!(!atlas.roads.contains_key(&old_id));
    let (_, length) = atlas.route("Berkeley", "San Jose", true);
    assert_eq!(length, 48.0);
}

#[test]
fn test_removed_place_id_reused_by_new_place() {
    let mut atlas = bay_area();
    let fremont = atlas.find("Fremont");
    let san_jose = atlas.find("San Jose");

    atlas.remove_place(fremont);
    assert_eq!(atlas.graph.edge_size(), 4);
    assert_eq!(atlas.roads.len(), 4);

    let hayward = atlas.add_place("Hayward", 10.0, -15.0);
    assert_eq!(hayward, fremont);
    atlas.add_road(atlas.find("Oakland"), hayward, 14.0).unwrap();
    atlas.add_road(hayward, san_jose, 27.0).unwrap();

    let (route, length) = atlas.route("Berkeley", "San Jose", true);
    assert_eq!(route, names(&["Berkeley", "Oakland", "Hayward", "San Jose"]));
    assert_eq!(length, 46.0);

    let reachable = WalkEngine::new().reachable(&atlas.graph, hayward).unwrap();
    assert_eq!(reachable.len(), 5);
}

// ==================== Persistence Tests ====================

#[test]
fn test_save_and_load_preserves_ids_and_routes() {
    let mut atlas = bay_area();
    atlas.close_road(atlas.find("Berkeley"), atlas.find("San Francisco"));
    atlas.remove_place(atlas.find("Oakland"));

    let json = atlas.save();
    let mut restored = Atlas::load(&json).unwrap();

    assert_eq!(restored.places, atlas.places);
    assert_eq!(restored.roads, atlas.roads);
    assert_eq!(
        restored.graph.edges().collect::<Vec<_>>(),
        atlas.graph.edges().collect::<Vec<_>>()
    );
    assert_eq!(
        restored.route("San Francisco", "San Jose", false),
        atlas.route("San Francisco", "San Jose", false)
    );

    // Both copies hand out the same ids from here on.
    let a = atlas.add_place("Richmond", -2.0, 6.0);
    let b = restored.add_place("Richmond", -2.0, 6.0);
    assert_eq!(a, b);
    let berkeley = atlas.find("Berkeley");
    assert_eq!(
        atlas.add_road(a, berkeley, 7.0).unwrap(),
        restored.add_road(b, berkeley, 7.0).unwrap()
    );
}

#[test]
fn test_load_rejects_directed_snapshot() {
    let atlas = bay_area();
    let json = atlas.save().replace("\"directed\":false", "\"directed\":true");
    assert!(Atlas::load(&json).is_err());
}
