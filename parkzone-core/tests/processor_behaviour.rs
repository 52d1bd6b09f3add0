//! Behavioural tests for [`ParkingZoneProcessor`].
//!
//! Scenarios drive the processor through [`ScriptedGraphProvider`] so retry
//! and classification behaviour can be exercised without a network.

use std::cell::RefCell;
use std::time::Duration;

use parkzone_core::test_support::{ScriptedGraphProvider, sample_graph};
use parkzone_core::{
    FetchError, ParkingZoneProcessor, ProcessorConfig, ProcessorError, StreetGraph, Zone,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Processor = ParkingZoneProcessor<ScriptedGraphProvider>;

/// Scenario state shared by every step.
struct ProcessorWorld {
    provider: RefCell<Option<ScriptedGraphProvider>>,
    processor: RefCell<Option<Processor>>,
    outcome: RefCell<Option<Result<(), ProcessorError>>>,
}

impl ProcessorWorld {
    fn install(&self, provider: ScriptedGraphProvider) {
        *self.provider.borrow_mut() = Some(provider);
    }

    fn with_processor<T>(&self, action: impl FnOnce(&mut Processor) -> T) -> T {
        let mut slot = self.processor.borrow_mut();
        if slot.is_none() {
            let provider = self
                .provider
                .borrow_mut()
                .take()
                .expect("a provider must be configured first");
            let config = ProcessorConfig::default().with_backoff_step(Duration::ZERO);
            let processor =
                ParkingZoneProcessor::new(provider, config).expect("default config is valid");
            *slot = Some(processor);
        }
        action(slot.as_mut().expect("processor initialised"))
    }

    fn record(&self, outcome: Result<(), ProcessorError>) {
        *self.outcome.borrow_mut() = Some(outcome);
    }
}

#[fixture]
fn world() -> ProcessorWorld {
    ProcessorWorld {
        provider: RefCell::new(None),
        processor: RefCell::new(None),
        outcome: RefCell::new(None),
    }
}

// --- Given steps ---

#[given("a street data service returning the sample graph")]
fn service_ok(#[from(world)] world: &ProcessorWorld) {
    world.install(ScriptedGraphProvider::always(Ok(sample_graph())));
}

#[given("a street data service that fails twice before answering")]
fn service_flaky(#[from(world)] world: &ProcessorWorld) {
    world.install(ScriptedGraphProvider::sequence([
        Err(FetchError::Network {
            url: "https://overpass.example/api/interpreter".to_owned(),
            message: "connection reset".to_owned(),
        }),
        Ok(StreetGraph::new()),
        Ok(sample_graph()),
    ]));
}

#[given("a street data service that cannot be reached")]
fn service_unreachable(#[from(world)] world: &ProcessorWorld) {
    world.install(ScriptedGraphProvider::always(Err(FetchError::Other {
        message: "Connection refused (os error 111)".to_owned(),
    })));
}

#[given("a street data service returning empty graphs")]
fn service_empty(#[from(world)] world: &ProcessorWorld) {
    world.install(ScriptedGraphProvider::always(Ok(StreetGraph::new())));
}

// --- When steps ---

#[when("I fetch map data with 3 attempts")]
fn fetch_three(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.with_processor(|processor| processor.fetch_map_data(3));
    world.record(outcome);
}

#[when("I process the zones")]
fn process(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.with_processor(Processor::process_zones);
    world.record(outcome);
}

// --- Then steps ---

#[then("every zone has matched segments")]
fn every_zone_matched(#[from(world)] world: &ProcessorWorld) {
    world.with_processor(|processor| {
        for zone in Zone::ALL {
            assert!(
                !processor.zone_geometries()[&zone].is_empty(),
                "expected segments for the {zone} zone"
            );
        }
    });
}

#[then("found and missing streets partition the configured streets")]
fn streets_partition(#[from(world)] world: &ProcessorWorld) {
    world.with_processor(|processor| {
        let found = processor.found_streets();
        let missing = processor.missing_streets();
        assert!(found.is_disjoint(&missing), "found and missing overlap");
        let union: Vec<String> = found.union(&missing).cloned().collect();
        let indexed: Vec<String> = processor
            .index()
            .street_names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(union, indexed);
    });
}

#[then("the fetch succeeds after 3 calls")]
fn fetch_succeeded(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(&*outcome, Some(Ok(()))),
        "expected success, got {outcome:?}"
    );
    world.with_processor(|processor| {
        assert_eq!(processor.provider().calls(), 3);
        assert_eq!(processor.graph(), Some(&sample_graph()));
    });
}

#[then("a connection error is reported after 3 calls")]
fn connection_error(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(&*outcome, Some(Err(ProcessorError::Connection { attempts: 3, .. }))),
        "expected Connection error, got {outcome:?}"
    );
    world.with_processor(|processor| assert_eq!(processor.provider().calls(), 3));
}

#[then("a no-data error is reported after 3 calls")]
fn no_data_error(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(
            &*outcome,
            Some(Err(ProcessorError::NoData {
                attempts: 3,
                source: FetchError::EmptyGraph,
            }))
        ),
        "expected NoData error, got {outcome:?}"
    );
    world.with_processor(|processor| assert_eq!(processor.provider().calls(), 3));
}

#[then("a state error is reported")]
fn state_error(#[from(world)] world: &ProcessorWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(&*outcome, Some(Err(ProcessorError::State { .. }))),
        "expected State error, got {outcome:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/processor.feature", name = $title)]
        fn $fn_name(world: ProcessorWorld) {
            let _ = world;
        }
    };
}

register_scenario!(processing_fetched_graph, "processing a fetched street graph");
register_scenario!(recovering_after_failures, "recovering after transient failures");
register_scenario!(giving_up_unreachable, "giving up on an unreachable service");
register_scenario!(giving_up_empty_area, "giving up on an area without streets");
register_scenario!(processing_before_fetching, "processing before fetching");
