/// Strips script-capable markup from a user supplied body while keeping
/// ordinary formatting tags (paragraphs, emphasis, links, images).
pub fn sanitize_body(raw: &str) -> String {
    ammonia::clean(raw)
}
