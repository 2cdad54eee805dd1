pub struct Icons;

impl Icons {
    pub const BOOKS: &str = "📚";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
    pub const FOLDER: &str = "📂";
    pub const EMPTY: &str = "∅";
    pub const BULLET: &str = "•";
}
