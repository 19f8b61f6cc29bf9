pub mod lemma_service;
