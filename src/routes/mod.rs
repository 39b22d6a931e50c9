pub mod movement_routes;
pub mod quarry_event_routes;
pub mod quarry_routes;
pub mod vehicle_routes;
