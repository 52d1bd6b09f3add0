//! Focused unit tests covering render configuration and the listing commands.

use super::*;
use crate::render::{RenderConfig, config_from_layers_for_test};
use camino::Utf8PathBuf;
use geo::Coord;
use parkzone_core::DEFAULT_MAX_RETRIES;
use parkzone_core::config::{DEFAULT_CENTER, DEFAULT_MAP_FILENAME};
use parkzone_data::DEFAULT_OVERPASS_URL;
use rstest::rstest;

#[rstest]
fn render_config_defaults_to_the_configured_city() {
    let config = RenderConfig::try_from(RenderArgs::default()).expect("defaults should resolve");
    assert_eq!(config.output, Utf8PathBuf::from(DEFAULT_MAP_FILENAME));
    assert_eq!(config.area.processor.center, Some(DEFAULT_CENTER));
    assert_eq!(config.area.processor.tile_provider, None);
    assert_eq!(config.area.overpass.endpoint, DEFAULT_OVERPASS_URL);
    assert_eq!(config.area.retries, DEFAULT_MAX_RETRIES);
}

#[rstest]
fn render_config_applies_explicit_options() {
    let args = RenderArgs {
        lat: Some(44.8176),
        lon: Some(20.4633),
        output: Some(Utf8PathBuf::from("belgrade.html")),
        tile_provider: Some("cartodb_dark".into()),
        radius: Some(1200),
        zoom: Some(12),
        overpass_url: Some("http://localhost:12345/api/interpreter".into()),
        retries: Some(5),
        ..RenderArgs::default()
    };

    let config = RenderConfig::try_from(args).expect("config should build");
    assert_eq!(config.output, Utf8PathBuf::from("belgrade.html"));
    assert_eq!(
        config.area.processor.center,
        Some(Coord {
            x: 20.4633,
            y: 44.8176
        })
    );
    assert_eq!(
        config.area.processor.tile_provider.as_deref(),
        Some("cartodb_dark")
    );
    assert_eq!(config.area.processor.settings.radius_meters, 1200);
    assert_eq!(config.area.processor.settings.zoom, 12);
    assert_eq!(
        config.area.overpass.endpoint,
        "http://localhost:12345/api/interpreter"
    );
    assert_eq!(config.area.retries, 5);
}

#[rstest]
#[case::only_latitude(Some(45.0), None, ARG_LON, ENV_RENDER_LON)]
#[case::only_longitude(None, Some(20.0), ARG_LAT, ENV_RENDER_LAT)]
fn render_config_requires_both_coordinates(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = RenderArgs {
        lat,
        lon,
        ..RenderArgs::default()
    };

    let err = RenderConfig::try_from(args).expect_err("half a coordinate should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::with_latitude(Some(45.0), None, ARG_LAT)]
#[case::with_longitude(None, Some(20.0), ARG_LON)]
#[case::with_both(Some(45.0), Some(20.0), ARG_LAT)]
fn render_config_rejects_location_with_coordinates(
    #[case] lat: Option<f64>,
    #[case] lon: Option<f64>,
    #[case] expected_other: &'static str,
) {
    let args = RenderArgs {
        lat,
        lon,
        location: Some("zrenjanin".into()),
        ..RenderArgs::default()
    };

    let err = RenderConfig::try_from(args).expect_err("conflicting centre should error");
    match err {
        CliError::ConflictingArguments { field, other } => {
            assert_eq!(field, ARG_LOCATION);
            assert_eq!(other, expected_other);
        }
        other => panic!("expected ConflictingArguments, found {other:?}"),
    }
}

#[rstest]
#[case::lowercase("zrenjanin")]
#[case::mixed_case("Zrenjanin")]
fn render_config_resolves_location_presets(#[case] id: &str) {
    let args = RenderArgs {
        location: Some(id.to_owned()),
        ..RenderArgs::default()
    };

    let config = RenderConfig::try_from(args).expect("preset should resolve");
    assert_eq!(config.area.processor.center, Some(DEFAULT_CENTER));
}

#[rstest]
fn render_config_rejects_unknown_locations() {
    let args = RenderArgs {
        location: Some("atlantis".into()),
        ..RenderArgs::default()
    };

    let err = RenderConfig::try_from(args).expect_err("unknown preset should error");
    match err {
        CliError::UnknownLocation { id } => assert_eq!(id, "atlantis"),
        other => panic!("expected UnknownLocation, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "radius": "wide" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "lat": 45.0,
            "lon": 20.0,
            "radius": 800,
            "tile_provider": "cartodb_positron",
            "output": "from-file.html",
        }),
        None,
    );
    composer.push_environment(json!({
        "lon": 20.5,
        "radius": 900,
    }));
    composer.push_cli(json!({
        "radius": 1000,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.area.processor.center, Some(Coord { x: 20.5, y: 45.0 }));
    assert_eq!(config.area.processor.settings.radius_meters, 1000);
    assert_eq!(
        config.area.processor.tile_provider.as_deref(),
        Some("cartodb_positron")
    );
    assert_eq!(config.output, Utf8PathBuf::from("from-file.html"));
}

#[rstest]
fn cli_parses_negative_coordinates() {
    let cli = Cli::try_parse_from(["parkzone", "render", "--lat", "-33.86", "--lon", "151.2"])
        .expect("negative latitude should parse");
    match cli.command {
        Command::Render(args) => {
            assert_eq!(args.lat, Some(-33.86));
            assert_eq!(args.lon, Some(151.2));
        }
        other => panic!("expected render command, found {other:?}"),
    }
}

#[rstest]
fn cli_accepts_global_verbose_flag() {
    let cli = Cli::try_parse_from(["parkzone", "providers", "--verbose"])
        .expect("verbose flag should parse after the subcommand");
    assert!(cli.verbose);
}

#[rstest]
fn providers_command_lists_every_tile_provider() {
    let mut buffer = Vec::new();
    dispatch(Command::Providers, &OverpassProviderBuilder, &mut buffer)
        .expect("listing should succeed");
    let output = String::from_utf8(buffer).expect("utf-8 output");

    assert_eq!(output.lines().count(), TILE_PROVIDERS.len());
    for provider in &TILE_PROVIDERS {
        assert!(
            output.contains(provider.id),
            "expected {} in listing:\n{output}",
            provider.id
        );
    }
}

#[rstest]
fn locations_command_lists_presets_with_coordinates() {
    let mut buffer = Vec::new();
    dispatch(Command::Locations, &OverpassProviderBuilder, &mut buffer)
        .expect("listing should succeed");
    let output = String::from_utf8(buffer).expect("utf-8 output");

    assert!(output.contains("zrenjanin"), "unexpected listing: {output}");
    assert!(output.contains("45.38096"), "unexpected listing: {output}");
}
