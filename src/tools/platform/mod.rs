//! Platform administration tools, registered when the server is
//! configured with a legacy platform key. These manage agents and tool
//! definitions by id.

pub mod agents;
pub mod tools;
