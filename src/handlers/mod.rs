// handlers/mod.rs - HTTP handlers
//
// risk     -> stateless scoring (/api/risk/*)
// profiles -> profile lifecycle with classification (/api/profiles/*)
//
// Handlers stay thin: decode the payload, call into risk/ or profile/, and let
// ApiError translate failures into status codes.

pub mod profiles;
pub mod risk;
