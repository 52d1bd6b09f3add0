//! Test-only graph providers and fixtures used by unit and behaviour tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use geo::Coord;

use crate::{FetchError, GraphProvider, StreetGraph, StreetName};

type FetchResult = Result<StreetGraph, FetchError>;

/// `GraphProvider` that replays scripted results.
///
/// Results from [`ScriptedGraphProvider::sequence`] are returned in order;
/// once drained every further call fails. A provider built with
/// [`ScriptedGraphProvider::always`] repeats the same result forever.
#[derive(Debug, Default)]
pub struct ScriptedGraphProvider {
    script: RefCell<VecDeque<FetchResult>>,
    repeat: Option<FetchResult>,
    calls: Cell<usize>,
    last_request: Cell<Option<(Coord<f64>, u32)>>,
}

impl ScriptedGraphProvider {
    /// Replay `results` once each, in order.
    #[must_use]
    pub fn sequence<I>(results: I) -> Self
    where
        I: IntoIterator<Item = FetchResult>,
    {
        Self {
            script: RefCell::new(results.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Return `result` on every call.
    #[must_use]
    pub fn always(result: FetchResult) -> Self {
        Self {
            repeat: Some(result),
            ..Self::default()
        }
    }

    /// Number of `fetch` calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Centre and radius of the most recent call.
    #[must_use]
    pub fn last_request(&self) -> Option<(Coord<f64>, u32)> {
        self.last_request.get()
    }
}

impl GraphProvider for ScriptedGraphProvider {
    fn fetch(&self, center: Coord<f64>, radius_meters: u32) -> FetchResult {
        self.calls.set(self.calls.get() + 1);
        self.last_request.set(Some((center, radius_meters)));
        if let Some(result) = self.script.borrow_mut().pop_front() {
            return result;
        }
        self.repeat.clone().unwrap_or_else(|| {
            Err(FetchError::Other {
                message: "scripted provider exhausted".to_owned(),
            })
        })
    }
}

/// A small street graph around the default centre.
///
/// Edges, in order:
/// 1. `Пупинова` (red)
/// 2. aliases `Улица А` / `Цара Душана` (yellow via the second alias)
/// 3. `Обилићева` (green)
/// 4. unnamed
/// 5. `Unknown Street` (not configured)
/// 6. `Немањина` (red) ending at a node missing from the graph
/// 7. `ПУПИНОВА` (red, different case)
#[must_use]
pub fn sample_graph() -> StreetGraph {
    let mut graph = StreetGraph::new();
    let nodes = [
        (1, 20.3900, 45.3800),
        (2, 20.3910, 45.3805),
        (3, 20.3920, 45.3810),
        (4, 20.3930, 45.3815),
        (5, 20.3940, 45.3820),
        (6, 20.3950, 45.3825),
    ];
    for (id, lon, lat) in nodes {
        graph.add_node(id, Coord { x: lon, y: lat });
    }
    graph.add_edge(1, 2, Some("Пупинова".into()));
    graph.add_edge(
        2,
        3,
        StreetName::from_candidates(["Улица А", "Цара Душана"]),
    );
    graph.add_edge(3, 4, Some("Обилићева".into()));
    graph.add_edge(4, 5, None);
    graph.add_edge(5, 6, Some("Unknown Street".into()));
    graph.add_edge(6, 99, Some("Немањина".into()));
    graph.add_edge(2, 1, Some("ПУПИНОВА".into()));
    graph
}
