use gpxstats_rs::error::ParseError;
use gpxstats_rs::pipeline::{extract_metrics, MovingConfig};

// ~100 m of latitude on the 6371 km sphere.
const LAT_STEP_100M: f64 = 100.0 / 111_194.93;

fn gpx_with_points(points: &[(f64, f64, Option<f64>, &str)]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <trk><name>Course du soir</name><type>running</type><trkseg>
"#,
    );
    for (lat, lon, ele, time) in points {
        body.push_str(&format!(r#"    <trkpt lat="{lat}" lon="{lon}">"#));
        if let Some(ele) = ele {
            body.push_str(&format!("<ele>{ele}</ele>"));
        }
        body.push_str(&format!("<time>{time}</time></trkpt>\n"));
    }
    body.push_str("  </trkseg></trk>\n</gpx>\n");
    body
}

#[test]
fn two_point_track_scenario() {
    // 100 m apart, one minute apart: 0.1 km, 1 min, ~6 km/h
    let gpx = gpx_with_points(&[
        (45.0, 5.0, None, "2026-05-01T08:00:00Z"),
        (45.0 + LAT_STEP_100M, 5.0, None, "2026-05-01T08:01:00Z"),
    ]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    assert_eq!(m.name, "Course du soir");
    assert_eq!(m.sport, "running");
    assert_eq!(m.date, "2026-05-01");
    assert!((m.distance_km - 0.1).abs() < 0.001);
    assert!((m.duration_min - 1.0).abs() < 1e-9);
    assert!((m.avg_speed_kmh - 6.0).abs() < 0.05);
}

#[test]
fn average_speed_consistent_with_distance_and_duration() {
    let gpx = gpx_with_points(&[
        (45.0, 5.0, None, "2026-05-01T08:00:00Z"),
        (45.0 + LAT_STEP_100M, 5.0, None, "2026-05-01T08:00:30Z"),
        (45.0 + 3.0 * LAT_STEP_100M, 5.0, None, "2026-05-01T08:01:30Z"),
    ]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    let expected = m.distance_km / (m.duration_min / 60.0);
    // Fields are rounded independently, so allow rounding slack
    assert!((m.avg_speed_kmh - expected).abs() < 0.05);
}

#[test]
fn rest_stop_counts_toward_duration_but_not_moving_data() {
    let gpx = gpx_with_points(&[
        (45.0, 5.0, None, "2026-05-01T08:00:00Z"),
        (45.0 + LAT_STEP_100M, 5.0, None, "2026-05-01T08:01:00Z"),
        // Ten minutes later, essentially the same spot
        (45.0 + LAT_STEP_100M + 1e-6, 5.0, None, "2026-05-01T08:11:00Z"),
    ]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    assert!((m.duration_min - 11.0).abs() < 1e-9);
    assert!((m.moving_time_min - 1.0).abs() < 1e-9);
    assert!((m.moving_distance_km - 0.1).abs() < 0.001);
    assert!(m.moving_distance_km <= m.distance_km);
}

#[test]
fn elevation_climb_uses_three_dimensional_distance() {
    // ~200 m horizontal with a 50 m climb: sqrt(200^2 + 50^2) ~ 206.155 m
    let gpx = gpx_with_points(&[
        (45.0, 5.0, Some(100.0), "2026-05-01T08:00:00Z"),
        (
            45.0 + 2.0 * LAT_STEP_100M,
            5.0,
            Some(150.0),
            "2026-05-01T08:01:00Z",
        ),
    ]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    assert!((m.distance_km - 0.206).abs() < 0.002, "got {}", m.distance_km);
}

#[test]
fn single_point_track_yields_zeroes() {
    let gpx = gpx_with_points(&[(45.0, 5.0, None, "2026-05-01T08:00:00Z")]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    assert_eq!(m.distance_km, 0.0);
    assert_eq!(m.duration_min, 0.0);
    assert_eq!(m.avg_speed_kmh, 0.0);
    assert_eq!(m.moving_avg_speed_kmh, 0.0);
}

#[test]
fn extraction_is_idempotent() {
    let gpx = gpx_with_points(&[
        (45.0, 5.0, Some(120.0), "2026-05-01T08:00:00Z"),
        (45.0 + LAT_STEP_100M, 5.0, Some(121.0), "2026-05-01T08:00:45Z"),
        (45.0 + 2.0 * LAT_STEP_100M, 5.0, Some(119.0), "2026-05-01T08:01:30Z"),
    ]);
    let config = MovingConfig::default();
    let first = extract_metrics(gpx.as_bytes(), &config).unwrap();
    let second = extract_metrics(gpx.as_bytes(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn only_first_track_is_reported() {
    let gpx = r#"<gpx>
  <trk><name>premier</name><trkseg>
    <trkpt lat="45.0" lon="5.0"><time>2026-05-01T08:00:00Z</time></trkpt>
    <trkpt lat="45.001" lon="5.0"><time>2026-05-01T08:01:00Z</time></trkpt>
  </trkseg></trk>
  <trk><name>second</name><trkseg>
    <trkpt lat="46.0" lon="6.0"><time>2026-05-01T09:00:00Z</time></trkpt>
    <trkpt lat="46.1" lon="6.0"><time>2026-05-01T10:00:00Z</time></trkpt>
  </trkseg></trk>
</gpx>"#;
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();

    assert_eq!(m.name, "premier");
    // Second track spans ~11 km; the first barely 111 m
    assert!(m.distance_km < 0.2);
}

#[test]
fn malformed_xml_is_rejected() {
    let err = extract_metrics(b"<gpx><trk></wrong></gpx>", &MovingConfig::default()).unwrap_err();
    assert!(matches!(err, ParseError::InvalidXml(_)));
}

#[test]
fn document_without_track_is_rejected() {
    let err = extract_metrics(
        b"<gpx><wpt lat=\"45.0\" lon=\"5.0\"/></gpx>",
        &MovingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::NoTracks));
}

#[test]
fn track_without_points_is_rejected() {
    let err = extract_metrics(
        b"<gpx><trk><trkseg></trkseg></trk></gpx>",
        &MovingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::NoPoints));
}

#[test]
fn missing_timestamps_are_rejected() {
    let err = extract_metrics(
        b"<gpx><trk><trkseg><trkpt lat=\"45.0\" lon=\"5.0\"/></trkseg></trk></gpx>",
        &MovingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::MissingTimestamps));
}

#[test]
fn record_serializes_with_wire_field_names() {
    let gpx = gpx_with_points(&[
        (45.0, 5.0, None, "2026-05-01T08:00:00Z"),
        (45.0 + LAT_STEP_100M, 5.0, None, "2026-05-01T08:01:00Z"),
    ]);
    let m = extract_metrics(gpx.as_bytes(), &MovingConfig::default()).unwrap();
    let value = serde_json::to_value(&m).unwrap();

    for key in [
        "nom",
        "type",
        "date",
        "distance totale",
        "durée totale",
        "vitesse moyenne",
        "vitesse max",
        "distance en mvt",
        "temps en mvt",
        "vitesse moyenne en mvt",
    ] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
}
