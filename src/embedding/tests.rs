use super::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

mod config_tests {
    use super::*;

    #[test]
    fn test_default_is_stub() {
        let config = EmbedderConfig::default();
        assert!(config.is_stub());
        assert_eq!(config.max_seq_len, crate::constants::DEFAULT_MAX_SEQ_LEN);
        assert_eq!(config.stub_dim, crate::constants::DEFAULT_EMBEDDING_DIM);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_selection() {
        let config = EmbedderConfig::from_selection(Some(PathBuf::from("/m").as_path()), 128);
        assert_eq!(config.model_dir, Some(PathBuf::from("/m")));
        assert_eq!(config.max_seq_len, 128);

        let config = EmbedderConfig::from_selection(None, 128);
        assert!(config.is_stub());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = EmbedderConfig {
            max_seq_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));

        let config = EmbedderConfig::stub().with_stub_dim(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_model_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let err = EmbedderConfig::new(dir.path()).validate().unwrap_err();
        match err {
            EmbeddingError::ModelUnavailable { path, reason } => {
                assert_eq!(path, dir.path());
                assert!(reason.contains("model.safetensors"));
            }
            other => panic!("expected ModelUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_model_dir() {
        let config = EmbedderConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }
}

mod embedder_tests {
    use super::*;

    #[test]
    fn test_load_missing_model_is_unavailable() {
        let err = BertEmbedder::load(EmbedderConfig::new("/nonexistent/e5-small-v2")).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_load_corrupt_model_is_unavailable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "not json").unwrap();
        std::fs::write(dir.path().join("model.safetensors"), b"garbage").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let err = BertEmbedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_stub_embedding_is_deterministic_and_normalized() {
        let embedder = BertEmbedder::load(EmbedderConfig::stub()).unwrap();
        assert!(embedder.is_stub());

        let a = embedder.embed("Rust developer with tokio experience").unwrap();
        let b = embedder.embed("Rust developer with tokio experience").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), embedder.embedding_dim());

        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);

        let other = embedder.embed("Pastry chef").unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_stub_rejects_empty_text() {
        let embedder = BertEmbedder::stub();
        assert!(matches!(embedder.embed(""), Err(EmbeddingError::EmptyInput)));
    }

    #[test]
    fn test_stub_dim_is_configurable() {
        let embedder = BertEmbedder::load(EmbedderConfig::stub().with_stub_dim(16)).unwrap();
        assert_eq!(embedder.embedding_dim(), 16);
        assert_eq!(embedder.embed("x").unwrap().len(), 16);
    }

    #[test]
    fn test_debug_output() {
        let embedder = BertEmbedder::stub();
        let debug = format!("{:?}", embedder);
        assert!(debug.contains("BertEmbedder"));
        assert!(debug.contains("Stub"));
    }

    #[test]
    fn test_arc_dyn_delegates() {
        let embedder: Arc<dyn Embedder> = Arc::new(BertEmbedder::stub());
        assert!(embedder.is_stub());
        assert_eq!(embedder.embed("abc").unwrap().len(), embedder.embedding_dim());
    }
}

mod cache_tests {
    use super::*;

    #[test]
    fn test_cache_hits_skip_inner_embedder() {
        let cached = CachedEmbedder::new(MockEmbedder::new(4), 16);

        let first = cached.embed("job description").unwrap();
        let second = cached.embed("job description").unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().call_count(), 1);
        assert_eq!(cached.entry_count(), 1);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let cached = CachedEmbedder::new(MockEmbedder::new(4).with_failure("bad"), 16);

        assert!(cached.embed("bad").is_err());
        assert!(cached.embed("bad").is_err());
        assert_eq!(cached.inner().call_count(), 2);
        assert_eq!(cached.entry_count(), 0);
    }

    #[test]
    fn test_cache_key_includes_prefix() {
        let cached = CachedEmbedder::new(MockEmbedder::new(4), 16);
        cached.embed("query: rust").unwrap();
        cached.embed("passage: rust").unwrap();
        assert_eq!(cached.inner().call_count(), 2);
    }
}

mod mock_tests {
    use super::*;
    use crate::scoring::similarity_percent;

    #[test]
    fn test_scripted_vectors_and_failures() {
        let mock = MockEmbedder::new(2)
            .with_vector("a", vec![1.0, 0.0])
            .with_failure("b");

        assert_eq!(mock.embed("a").unwrap(), vec![1.0, 0.0]);
        assert!(mock.embed("b").is_err());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.seen_texts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_vector_for_percent() {
        let jd = [1.0f32, 0.0];
        for percent in [0.0, 40.0, 62.3, 91.0, 100.0] {
            let score = similarity_percent(&jd, &vector_for_percent(percent)).unwrap();
            assert!((score - percent).abs() < 0.011, "{percent} -> {score}");
        }
    }
}

mod utils_tests {
    use super::utils::l2_normalize;

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0f32, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0f32; 3];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0, 0.0]);
    }
}
