use axum::{
    extract::{Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::catalog::SourceDescriptor;
use crate::index::{IndexStats, WordGroups};
use crate::loader::GroupedRecord;
use crate::normalize::NormalizedWord;
use crate::Language;
use std::sync::Arc;
use std::str::FromStr;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Deserialize)]
pub struct LanguageParams {
    pub language: String,
}

#[derive(Deserialize)]
pub struct RecordsParams {
    pub language: String,
    pub source: String,
}

#[derive(Deserialize)]
pub struct IndexParams {
    pub language: String,
    /// Comma-separated source keys; every catalog source when absent
    pub sources: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub slug: String,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub language: Language,
    pub fingerprint: String,
    pub stats: IndexStats,
    pub groups: WordGroups,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub group: String,
    pub word: NormalizedWord,
}

fn parse_language(raw: &str) -> Result<Language, ApiError> {
    Language::from_str(raw)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() })))
}

pub async fn get_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        Language::all()
            .iter()
            .map(|l| LanguageInfo { name: l.as_str().to_string(), slug: l.slug().to_string() })
            .collect(),
    )
}

pub async fn get_sources(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LanguageParams>,
) -> Result<Json<Vec<SourceDescriptor>>, ApiError> {
    let language = parse_language(&params.language)?;
    Ok(Json(state.lexicon.list_sources(language).await))
}

pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordsParams>,
) -> Result<Json<Vec<GroupedRecord>>, ApiError> {
    let language = parse_language(&params.language)?;
    Ok(Json(state.lexicon.load_records(language, &params.source).await))
}

pub async fn get_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let language = parse_language(&params.language)?;

    let groups = match params.sources.as_deref() {
        Some(list) => {
            let keys: Vec<&str> = list.split(',').map(str::trim).filter(|k| !k.is_empty()).collect();
            state.lexicon.build_index(language, keys).await
        }
        None => state.lexicon.build_full_index(language).await,
    };

    let body = match params.search.as_deref() {
        Some(text) => {
            let hits: Vec<SearchHit> = groups
                .search(text)
                .into_iter()
                .map(|(group, word)| SearchHit { group: group.to_string(), word: word.clone() })
                .collect();
            serde_json::to_value(&hits)
        }
        None => serde_json::to_value(&IndexResponse {
            language,
            fingerprint: groups.fingerprint(),
            stats: groups.stats(),
            groups,
        }),
    };

    body.map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::lexicon::Lexicon;
    use crate::store::MemoryStore;

    fn state() -> Arc<AppState> {
        let store = MemoryStore::new()
            .with_catalog(Language::Latin, r#"{"core": "Core", "extra": "Extra"}"#)
            .with_source(Language::Latin, "core", r#"{"nouns": [{"word": "rēx", "meaning": "king"}]}"#)
            .with_source(Language::Latin, "extra", r#"{"nouns": [{"word": "lēx", "meaning": "law"}]}"#);
        let lexicon = Lexicon::new(Arc::new(store)).with_sink(Arc::new(MemorySink::new()));
        Arc::new(AppState { lexicon })
    }

    #[tokio::test]
    async fn test_unknown_language_is_bad_request() {
        let params = LanguageParams { language: "Klingon".to_string() };
        let (status, body) = get_sources(State(state()), Query(params)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.0.error.contains("Klingon"));
    }

    #[tokio::test]
    async fn test_sources_listing() {
        let params = LanguageParams { language: "latin".to_string() };
        let Json(sources) = get_sources(State(state()), Query(params)).await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].key, "core");
    }

    #[tokio::test]
    async fn test_index_with_selected_sources() {
        let params = IndexParams {
            language: "Latin".to_string(),
            sources: Some("extra, core".to_string()),
            search: None,
        };
        let Json(body) = get_index(State(state()), Query(params)).await.unwrap();
        assert_eq!(body["language"], "Latin");
        assert_eq!(body["groups"]["nouns"][0]["word"], "lēx");
        assert_eq!(body["groups"]["nouns"][1]["word"], "rēx");
        assert_eq!(body["stats"]["words"], 2);
    }

    #[tokio::test]
    async fn test_index_search() {
        let params = IndexParams {
            language: "Latin".to_string(),
            sources: None,
            search: Some("law".to_string()),
        };
        let Json(body) = get_index(State(state()), Query(params)).await.unwrap();
        let hits = body.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["group"], "nouns");
    }

    #[tokio::test]
    async fn test_languages() {
        let Json(languages) = get_languages().await;
        assert_eq!(languages.len(), 3);
        assert_eq!(languages[0].slug, "ancient-greek");
    }
}
