// Single source of truth for all default values.

// --- Evidence ---
pub const DEFAULT_FALLBACK_EVIDENCE_REF: &str = "nitto_PDF/slide_1.png";
pub const DEFAULT_FALLBACK_ROW: usize = 0;

// --- Retrieval ---
pub const DEFAULT_SELECTION_TOP_K: usize = 15;
pub const DEFAULT_RETRY_TOP_K: usize = 10;
pub const DEFAULT_RETRY_POSITION: usize = 3;
pub const DEFAULT_AUDIT_TOP_K: usize = 3;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_CHUNK_SIZE: usize = 300;
pub const DEFAULT_EXCLUSION_MIN_REMAINING: usize = 2;
pub const DEFAULT_OVERVIEW_ANCHOR: &str = "slide_1";
pub const DEFAULT_PERFORMANCE_ANCHOR: &str = "slide_31";
pub const DEFAULT_EXCLUDED_ANCHOR: &str = "slide_52";
pub const DEFAULT_EXCLUDED_TERM: &str = "知財";

// --- Answer ---
pub const DEFAULT_MAX_CHARS: usize = 200;
pub const DEFAULT_MIN_SENTENCE_CUT: usize = 80;
pub const DEFAULT_HARD_CUT: usize = 190;
pub const DEFAULT_MIN_EVIDENCE_CHARS: usize = 50;
pub const DEFAULT_FAQ_TOP_K: usize = 4;
pub const DEFAULT_MULTI_TOP_N: usize = 5;
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

// --- LLM ---
pub const DEFAULT_LLM_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_LLM_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LLM_MAX_RETRIES: u32 = 2;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Interaction log ---
pub const DEFAULT_LOG_DIR: &str = "log";
pub const DEFAULT_LOG_REQUIRED: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
