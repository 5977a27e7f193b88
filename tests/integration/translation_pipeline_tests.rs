/*!
 * End-to-end tests for batch translation orchestration
 */

use grimoire::errors::TranslationError;
use grimoire::providers::mock::MockProvider;
use grimoire::translation::{TranslationCache, cache_key};

use crate::common::{build_translator, cache_path_in, create_temp_dir};

#[test]
fn test_prepopulatedCache_shouldYieldResultWithZeroProviderCalls() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut cache = TranslationCache::load(&path);
    cache.insert(cache_key("mock", "EN", "FR", "Hello"), "Bonjour".to_string());
    cache.persist().unwrap();

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let results = translator.translate_many(&["Hello".to_string()]).unwrap();

    assert_eq!(results, vec!["Bonjour".to_string()]);
    assert_eq!(observer.call_count(), 0);
}

#[test]
fn test_seventyFiveSegments_shouldUseThreeBatchesInOrder() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let segments: Vec<String> = (0..75).map(|index| format!("segment {index}")).collect();
    let results = translator.translate_many(&segments).unwrap();

    assert_eq!(observer.call_count(), 3);
    assert_eq!(results.len(), 75);
    for (index, result) in results.iter().enumerate() {
        assert_eq!(result, &format!("[FR] segment {index}"));
    }
}

#[test]
fn test_shortCountProvider_shouldFailWithCountMismatch() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut translator = build_translator(MockProvider::short_count(), &path, 30);
    let segments: Vec<String> = (0..30).map(|index| format!("segment {index}")).collect();

    let error = translator.translate_many(&segments).unwrap_err();
    match error {
        TranslationError::BatchCountMismatch {
            batch_index,
            expected,
            received,
        } => {
            assert_eq!(batch_index, 0);
            assert_eq!(expected, 30);
            assert_eq!(received, 29);
        }
        other => panic!("Expected a count mismatch, got: {other}"),
    }
}

#[test]
fn test_whitespaceVariants_shouldShareOneCacheEntryAndOneCall() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let results = translator
        .translate_many(&["Hello  world".to_string(), "Hello world".to_string()])
        .unwrap();

    assert_eq!(observer.call_count(), 1);
    assert_eq!(translator.cache().len(), 1);
    assert_eq!(results[0], results[1]);
}

#[test]
fn test_emptySegments_shouldShortCircuitBeforeProviderAndCache() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let results = translator
        .translate_many(&["".to_string(), "   ".to_string(), "Hello".to_string()])
        .unwrap();

    assert_eq!(results[0], "");
    assert_eq!(results[1], "");
    assert_eq!(results[2], "[FR] Hello");
    // Only the real segment went out, and only it was cached
    assert_eq!(observer.call_count(), 1);
    assert_eq!(translator.cache().len(), 1);
}

#[test]
fn test_allEmptyInput_shouldMakeNoCallsAtAll() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let results = translator
        .translate_many(&["".to_string(), "\t ".to_string()])
        .unwrap();

    assert_eq!(results, vec![String::new(), String::new()]);
    assert_eq!(observer.call_count(), 0);
    assert!(translator.cache().is_empty());
}

#[test]
fn test_cachePersistsAfterEveryBatch() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut translator = build_translator(MockProvider::working(), &path, 1);
    let segments: Vec<String> = (0..3).map(|index| format!("segment {index}")).collect();
    translator.translate_many(&segments).unwrap();

    // A fresh load from disk sees everything the run stored
    let reloaded = TranslationCache::load(&path);
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn test_secondRun_shouldBeServedEntirelyFromDisk() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);
    let segments: Vec<String> = (0..5).map(|index| format!("segment {index}")).collect();

    let mut first_run = build_translator(MockProvider::working(), &path, 2);
    let first_results = first_run.translate_many(&segments).unwrap();

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut second_run = build_translator(provider, &path, 2);
    let second_results = second_run.translate_many(&segments).unwrap();

    assert_eq!(first_results, second_results);
    assert_eq!(observer.call_count(), 0);
}

#[test]
fn test_failedRun_shouldRetainPreviouslyPersistedProgress() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    // First run persists one translation
    let mut first_run = build_translator(MockProvider::working(), &path, 30);
    first_run
        .translate_many(&["segment zero".to_string()])
        .unwrap();

    // Second run fails on new work, but the stored entry survives
    let mut second_run = build_translator(MockProvider::failing(), &path, 30);
    let result = second_run.translate_many(&["segment one".to_string()]);
    assert!(result.is_err());

    let reloaded = TranslationCache::load(&path);
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_mixedHitsAndMisses_shouldInterleaveInInputOrder() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut cache = TranslationCache::load(&path);
    cache.insert(
        cache_key("mock", "EN", "FR", "segment 1"),
        "CACHED ONE".to_string(),
    );
    cache.insert(
        cache_key("mock", "EN", "FR", "segment 3"),
        "CACHED THREE".to_string(),
    );
    cache.persist().unwrap();

    let provider = MockProvider::working();
    let observer = provider.clone();
    let mut translator = build_translator(provider, &path, 30);

    let segments: Vec<String> = (0..5).map(|index| format!("segment {index}")).collect();
    let results = translator.translate_many(&segments).unwrap();

    assert_eq!(
        results,
        vec![
            "[FR] segment 0".to_string(),
            "CACHED ONE".to_string(),
            "[FR] segment 2".to_string(),
            "CACHED THREE".to_string(),
            "[FR] segment 4".to_string(),
        ]
    );
    assert_eq!(observer.call_count(), 1);
}

#[test]
fn test_markupTokens_shouldSurviveCaseFoldingProvider() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut translator = build_translator(MockProvider::uppercase(), &path, 30);
    let results = translator
        .translate_many(&["cast {@spell Fireball|phb} for 8d6 damage".to_string()])
        .unwrap();

    assert_eq!(results[0], "CAST {@spell Fireball|phb} FOR 8d6 DAMAGE");
}

#[test]
fn test_cachedValue_isStoredStillProtected() {
    let dir = create_temp_dir().unwrap();
    let path = cache_path_in(&dir);

    let mut translator = build_translator(MockProvider::working(), &path, 30);
    translator
        .translate_many(&["Deal 3d8 damage".to_string()])
        .unwrap();

    let raw_store = std::fs::read_to_string(&path).unwrap();
    // The durable entry keeps the placeholder, not the restored dice text
    assert!(raw_store.contains("§§T0§§"));
    assert!(!raw_store.contains("3d8"));
}
