/// Appends `param=page` using `&` or `?` depending on existing params.
pub fn build_paged_url(base_url: &str, param: &str, page: usize) -> String {
    let separator = determine_separator(base_url);
    format!("{}{}{}={}", base_url, separator, param, page)
}

fn determine_separator(url: &str) -> char {
    if url.contains('?') { '&' } else { '?' }
}
