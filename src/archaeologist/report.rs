const BANNER_WIDTH: usize = 60;
const TITLE: &str = "          📜 AI ARCHAEOLOGIST RECONSTRUCTION REPORT 📜";
pub const NO_SOURCES: &str = "No relevant sources were found in the archives.";

/// Lays out the final report. Pure: same inputs, same bytes.
pub fn generate_report(original: &str, reconstructed: &str, urls: &[String]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);

    let mut report = format!("\n{banner}\n{TITLE}\n{banner}\n\n");

    report.push_str("--- [Original Fragment] ---\n");
    report.push_str(&format!("> {}\n\n", original));

    report.push_str("--- [AI-Reconstructed Text & Analysis] ---\n");
    report.push_str(&format!("{}\n\n", reconstructed.trim()));

    report.push_str("--- [Contextual Sources] ---\n");
    if urls.is_empty() {
        report.push_str(NO_SOURCES);
        report.push('\n');
    } else {
        let entries = urls
            .iter()
            .enumerate()
            .map(|(i, url)| format!("[{}] {}\n", i + 1, url))
            .collect::<String>();
        report.push_str(&entries);
    }

    report.push_str(&format!("\n{banner}\n"));

    report
}
