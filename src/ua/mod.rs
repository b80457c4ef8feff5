mod agent;
pub use agent::UserAgent;

mod device;
pub use device::DeviceKind;
