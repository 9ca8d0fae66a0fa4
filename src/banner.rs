use console::{measure_text_width, style};
use std::iter;

/// Prints a decorative, colorized banner describing the history rewrite
/// about to run.
///
/// The banner is dynamically sized to fit the widest **visible** line of
/// text, using [`console::measure_text_width`] to ignore ANSI color codes
/// when calculating padding. It is framed with Unicode box-drawing
/// characters (`╔═╗`, `║ ║`, `╚═╝`) and uses [`console::style`] for
/// coloring and bolding.
///
/// Borders are styled independently from the inner text so that embedded
/// color codes inside the content (the yellow warning lines) do not affect
/// the color of the box edges.
///
/// # Parameters
///
/// * `found` – How many commits carry the trailer and will be rewritten.
///
/// # Output
///
/// This function prints directly to standard output. It does not return any value.
///
/// # Examples
///
/// ```no_run
/// use git_coauthor_scrub::banner::print_banner;
///
/// fn main() {
///     print_banner(3);
/// }
/// ```
pub fn print_banner(found: usize) {
    let lines = banner_lines(found);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l)) // ignore ANSI in content
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible; // includes the one space after left border
        // build row: [blue left] + [colored line] + [padding spaces] + [blue right]
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Constructs the lines of text for the rewrite banner.
///
/// Returns each banner line as a `String`, in display order: 1) title,
/// 2) irreversibility warning, 3) affected-commit count, 4) steps.
///
/// **Note:** the warning lines carry ANSI styling (yellow, first bold).
/// Consumers that need accurate width calculations should measure
/// **visible** width (e.g., with `console::measure_text_width`) rather
/// than `str::len()`.
fn banner_lines(found: usize) -> Vec<String> {
    let top = ["Xóa trailer Co-authored-by khỏi lịch sử commit", ""]
        .into_iter()
        .map(|s| s.to_string());

    let warning = vec![
        style("Thao tác này sẽ rewrite toàn bộ lịch sử và không thể hoàn tác.")
            .yellow()
            .bold()
            .to_string(),
        style("(Backup refs, reflog và các object cũ sẽ bị dọn sạch sau khi rewrite.)")
            .yellow()
            .to_string(),
    ]
    .into_iter();

    let bottom = iter::once(String::new())
        .chain(iter::once(format!("Sẽ xóa trailer khỏi {} commits", found)))
        .chain(
            [
                "Công cụ sẽ tự động:",
                "  1) Chạy git filter-branch với msg-filter trên tất cả refs",
                "  2) Xóa backup refs, expire reflog và chạy gc",
                "  3) Quét lại lịch sử để kiểm tra kết quả",
            ]
            .into_iter()
            .map(|s| s.to_string()),
        );

    top.chain(warning).chain(bottom).collect()
}
