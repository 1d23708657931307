use instant::{Duration, Instant};
use mapview::{
    GeoPoint, GestureEvent, MapEvent, MapEventKind, MapView, MapViewBuilder, MapViewConfig, Point,
};

const FRAME: Duration = Duration::from_millis(16);

/// Replays a gesture script against a headless map view and prints the
/// viewport after every step.
///
/// Usage: `mapview-demo [config.json] [gestures.json]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => serde_json::from_str::<MapViewConfig>(&std::fs::read_to_string(path)?)?,
        None => MapViewConfig::default(),
    };
    let script = match args.next() {
        Some(path) => serde_json::from_str::<Vec<GestureEvent>>(&std::fs::read_to_string(path)?)?,
        None => default_script(),
    };

    let mut map = MapViewBuilder::new()
        .config(config)
        .center(GeoPoint::new(37.7749, -122.4194))
        .zoom(12.0)
        .size(800.0, 600.0)
        .build()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    map.on(MapEventKind::Zoom, |event| {
        if let MapEvent::Zoom { zoom } = event {
            log::info!("zoom committed: {:.3}", zoom);
        }
    });

    let mut now = Instant::now();
    print_state("start", &map);
    for gesture in &script {
        let consumed = map.handle_gesture(gesture, now);
        log::debug!("{:?} consumed: {}", gesture, consumed);
        now += FRAME;
        while map.tick(now) {
            now += FRAME;
        }
        print_state(&format!("{:?}", gesture), &map);
    }

    map.zoom_in(true);
    while map.tick(now) {
        now += FRAME;
    }
    print_state("zoom_in", &map);
    Ok(())
}

fn default_script() -> Vec<GestureEvent> {
    vec![
        GestureEvent::Down {
            position: Point::new(400.0, 300.0),
        },
        GestureEvent::Scroll {
            distance: Point::new(120.0, -40.0),
        },
        GestureEvent::Fling {
            velocity: Point::new(900.0, 200.0),
        },
        GestureEvent::PinchStart {
            focus: Point::new(300.0, 250.0),
        },
        GestureEvent::PinchUpdate { scale: 1.3 },
        GestureEvent::PinchUpdate { scale: 1.8 },
        GestureEvent::PinchEnd,
        GestureEvent::DoubleTap {
            position: Point::new(600.0, 150.0),
        },
    ]
}

fn print_state(label: &str, map: &MapView) {
    let center = map.center();
    let bbox = map.bounding_box();
    println!(
        "{:<40} center=({:.5}, {:.5}) zoom={:.3} bbox=[N{:.3} S{:.3} E{:.3} W{:.3}]",
        label,
        center.lat,
        center.lon,
        map.zoom_level(false),
        bbox.north,
        bbox.south,
        bbox.east,
        bbox.west
    );
}
