pub mod bounds;
pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod interaction;
pub mod map;
pub mod projection;
pub mod redraw;
pub mod scroll;
pub mod tile_system;
pub mod viewport;
pub mod zoom;
