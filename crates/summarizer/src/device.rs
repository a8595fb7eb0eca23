use crate::error::InitializationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tch::{Cuda, Device};

/// Compute device policy for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// CUDA when available, CPU otherwise.
    #[default]
    Auto,
    /// Always run on the CPU.
    Cpu,
    /// Require a CUDA device.
    Cuda,
    /// Require Apple Metal (MPS).
    Mps,
}

impl DeviceKind {
    /// Resolve the policy to a concrete device on this host.
    ///
    /// `index` selects the CUDA ordinal and defaults to 0.
    pub fn resolve(self, index: Option<usize>) -> Result<Device, InitializationError> {
        let index = index.unwrap_or(0);
        match self {
            DeviceKind::Auto => {
                if Cuda::is_available() && index < cuda_device_count() {
                    Ok(Device::Cuda(index))
                } else {
                    Ok(Device::Cpu)
                }
            }
            DeviceKind::Cpu => Ok(Device::Cpu),
            DeviceKind::Cuda => {
                if !Cuda::is_available() {
                    return Err(InitializationError::DeviceUnavailable(
                        "CUDA was requested but no CUDA device is available".into(),
                    ));
                }
                let count = cuda_device_count();
                if index >= count {
                    return Err(InitializationError::DeviceUnavailable(format!(
                        "CUDA device {} requested but only {} present",
                        index, count
                    )));
                }
                Ok(Device::Cuda(index))
            }
            DeviceKind::Mps => {
                if tch::utils::has_mps() {
                    Ok(Device::Mps)
                } else {
                    Err(InitializationError::DeviceUnavailable(
                        "MPS was requested but is not available on this host".into(),
                    ))
                }
            }
        }
    }
}

fn cuda_device_count() -> usize {
    usize::try_from(Cuda::device_count()).unwrap_or(0)
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceKind::Auto => "auto",
            DeviceKind::Cpu => "cpu",
            DeviceKind::Cuda => "cuda",
            DeviceKind::Mps => "mps",
        };
        f.write_str(name)
    }
}

impl FromStr for DeviceKind {
    type Err = InitializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DeviceKind::Auto),
            "cpu" => Ok(DeviceKind::Cpu),
            "cuda" | "gpu" => Ok(DeviceKind::Cuda),
            "mps" | "metal" => Ok(DeviceKind::Mps),
            other => Err(InitializationError::Config(format!(
                "unknown device '{}', expected one of auto, cpu, cuda, mps",
                other
            ))),
        }
    }
}

/// Human readable label for a resolved device.
pub fn device_label(device: Device) -> String {
    match device {
        Device::Cpu => "cpu".to_string(),
        Device::Cuda(index) => format!("cuda:{}", index),
        Device::Mps => "mps".to_string(),
        other => format!("{:?}", other).to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_names() {
        assert_eq!("auto".parse::<DeviceKind>().unwrap(), DeviceKind::Auto);
        assert_eq!("CPU".parse::<DeviceKind>().unwrap(), DeviceKind::Cpu);
        assert_eq!("gpu".parse::<DeviceKind>().unwrap(), DeviceKind::Cuda);
        assert_eq!(" metal ".parse::<DeviceKind>().unwrap(), DeviceKind::Mps);
        assert!("tpu".parse::<DeviceKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [DeviceKind::Auto, DeviceKind::Cpu, DeviceKind::Cuda, DeviceKind::Mps] {
            assert_eq!(kind.to_string().parse::<DeviceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn cpu_always_resolves() {
        assert_eq!(DeviceKind::Cpu.resolve(None).unwrap(), Device::Cpu);
    }

    #[test]
    fn auto_falls_back_to_cpu_without_cuda() {
        let device = DeviceKind::Auto.resolve(None).unwrap();
        if Cuda::is_available() {
            assert_eq!(device, Device::Cuda(0));
        } else {
            assert_eq!(device, Device::Cpu);
        }
    }

    #[test]
    fn labels_devices() {
        assert_eq!(device_label(Device::Cpu), "cpu");
        assert_eq!(device_label(Device::Cuda(1)), "cuda:1");
        assert_eq!(device_label(Device::Mps), "mps");
    }
}
