//! Built-in device registry.

use super::types::{CodeShape, DeviceDescriptor};
use crate::error::{KeyscriptError, Result};

/// A lookup table of device descriptors, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the devices supported out of the box.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DeviceDescriptor::new(
            "xiao_rp2040",
            "Seeed Xiao RP2040",
            CodeShape::CircuitPython,
        ));
        registry.register(DeviceDescriptor::new(
            "raspberry_pi_pico",
            "Raspberry Pi Pico",
            CodeShape::CircuitPython,
        ));
        registry.register(DeviceDescriptor::new(
            "arduino_leonardo",
            "Arduino Leonardo",
            CodeShape::Arduino,
        ));
        registry.register(DeviceDescriptor::new("teensy_4", "Teensy 4.0", CodeShape::Arduino));
        registry.register(DeviceDescriptor::new(
            "evilcrow_cable",
            "EvilCrow-Cable",
            CodeShape::Arduino,
        ));
        registry
    }

    /// Add a device, replacing any existing one with the same id.
    pub fn register(&mut self, device: DeviceDescriptor) {
        match self.devices.iter_mut().find(|d| d.id == device.id) {
            Some(existing) => *existing = device,
            None => self.devices.push(device),
        }
    }

    /// Look up a device by id.
    pub fn get(&self, id: &str) -> Option<&DeviceDescriptor> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Look up a device by id, failing with [`KeyscriptError::UnknownDevice`].
    pub fn resolve(&self, id: &str) -> Result<&DeviceDescriptor> {
        self.get(id).ok_or_else(|| KeyscriptError::UnknownDevice {
            device: id.to_string(),
        })
    }

    /// All devices in registration order.
    pub fn list(&self) -> &[DeviceDescriptor] {
        &self.devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_devices() {
        let registry = DeviceRegistry::builtin();
        assert_eq!(registry.list().len(), 5);
        assert_eq!(registry.list()[0].id, crate::DEFAULT_DEVICE);

        let leonardo = registry.resolve("arduino_leonardo").unwrap();
        assert_eq!(leonardo.shape, CodeShape::Arduino);
        assert_eq!(leonardo.extension, "ino");

        let pico = registry.get("raspberry_pi_pico").unwrap();
        assert_eq!(pico.extension, "py");
    }

    #[test]
    fn test_unknown_device() {
        let registry = DeviceRegistry::builtin();
        let err = registry.resolve("commodore_64").unwrap_err();
        assert!(
            matches!(err, KeyscriptError::UnknownDevice { ref device } if device == "commodore_64")
        );
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = DeviceRegistry::builtin();
        registry.register(DeviceDescriptor::new("teensy_4", "Teensy 4.1", CodeShape::Arduino));
        assert_eq!(registry.list().len(), 5);
        assert_eq!(registry.get("teensy_4").unwrap().name, "Teensy 4.1");
    }
}
