use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    pub static ref RESOLVE_TOTAL: IntCounterVec = register_int_counter_vec!(
        "builder_score_resolve_total",
        "name resolutions grouped by result (found, not_found, error)",
        &["result"],
    )
    .unwrap();
    pub static ref UPSTREAM_TOTAL: IntCounterVec = register_int_counter_vec!(
        "builder_score_upstream_total",
        "score api requests grouped by result (ok, not_found, error)",
        &["result"],
    )
    .unwrap();
    pub static ref OG_AVATAR_TOTAL: IntCounterVec = register_int_counter_vec!(
        "builder_score_og_avatar_total",
        "avatar embedding attempts grouped by result (embedded, skipped, failed)",
        &["result"],
    )
    .unwrap();
    pub static ref OG_RENDER_TOTAL: IntCounterVec = register_int_counter_vec!(
        "builder_score_og_render_total",
        "rendered preview images grouped by kind (fallback, card)",
        &["kind"],
    )
    .unwrap();
}
