/// Makes a report title safe for file names and `Content-Disposition`.
pub fn clean_title(input: &str) -> String {
    input.replace([':', '/', '\\'], "_")
}
