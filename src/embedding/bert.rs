use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

/// BERT-family sentence encoder with attention-masked mean pooling.
///
/// Works with sentence-transformers and E5 checkpoints exported as
/// `config.json` + `model.safetensors`. Cloning shares the weights.
#[derive(Clone)]
pub struct SentenceEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl SentenceEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        // Exports differ on whether weights sit under a "bert." prefix.
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Encodes one tokenized text into a pooled `[hidden_size]` vector.
    pub fn encode(
        &self,
        token_ids: &[u32],
        type_ids: &[u32],
        attention_mask: &[u32],
        device: &Device,
    ) -> Result<Vec<f32>> {
        let input_ids = Tensor::new(token_ids, device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(type_ids, device)?.unsqueeze(0)?;
        let mask = Tensor::new(attention_mask, device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&mask))?;

        let mask = mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
        let pooled = summed.broadcast_div(&counts)?.squeeze(0)?;

        pooled.to_vec1::<f32>()
    }
}
