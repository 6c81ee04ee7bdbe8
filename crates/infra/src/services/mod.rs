mod location;

pub use location::{
    capture_location, resolve_address, CapturedLocation, FixedLocationProvider, ILocationProvider,
    UNKNOWN_LOCATION,
};
