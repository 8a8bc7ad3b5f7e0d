use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from a model directory, truncating at `max_len` tokens.
///
/// Padding is disabled: texts are encoded one at a time, so every token is real.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let tokenizer_path = model_dir.join("tokenizer.json");
    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;
    tokenizer.with_padding(None::<PaddingParams>);

    Ok(tokenizer)
}

/// Scales `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
