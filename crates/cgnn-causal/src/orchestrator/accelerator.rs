/// Accelerator devices visible to this process.
///
/// This build executes on the CPU; the pool only decides whether a
/// round-robin placement is satisfiable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceleratorPool {
    devices: Vec<usize>,
}

impl AcceleratorPool {
    /// No accelerators.
    pub fn none() -> Self {
        Self::default()
    }

    /// Devices `0..count`.
    pub fn new(count: usize) -> Self {
        Self {
            devices: (0..count).collect(),
        }
    }

    pub fn with_devices(devices: Vec<usize>) -> Self {
        Self { devices }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.devices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
