use candle_core::Device;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::{info, warn};

use super::error::EmbeddingError;

/// Picks the inference device from the enabled GPU features, falling back to CPU.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(any(feature = "metal", feature = "cuda"))]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Embedding on Metal GPU");
                return Ok(device);
            }
            Err(e) => failures.push(format!("metal: {e}")),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Embedding on CUDA GPU");
                return Ok(device);
            }
            Err(e) => failures.push(format!("cuda: {e}")),
        }
    }

    #[cfg(any(feature = "metal", feature = "cuda"))]
    warn!(reason = %failures.join("; "), "GPU unavailable, embedding on CPU");

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    tracing::debug!("No GPU backend compiled, embedding on CPU");

    Ok(Device::Cpu)
}

/// Short label for logs and readiness responses.
pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}
