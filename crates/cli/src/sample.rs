/// Paragraph summarized when the CLI is run without input.
///
/// Lines keep their leading indentation and trailing space.
pub const SAMPLE_TEXT: &str = concat!(
    "\n",
    "    Artificial Intelligence (AI) is transforming nearly every aspect of modern society. \n",
    "    From healthcare and finance to transportation and entertainment, AI technologies \n",
    "    are revolutionizing how we work, live, and interact. Machine learning algorithms \n",
    "    can now detect diseases with remarkable accuracy, predict market trends, \n",
    "    drive autonomous vehicles, and even create art and music. \n",
    "    \n",
    "    The rapid advancement of AI raises both exciting possibilities and critical ethical \n",
    "    considerations. While AI promises unprecedented efficiency and innovation, \n",
    "    it also introduces complex challenges related to privacy, job displacement, \n",
    "    and the potential for algorithmic bias. Researchers and policymakers are \n",
    "    increasingly focused on developing frameworks that ensure AI technologies \n",
    "    are developed and deployed responsibly, with a focus on transparency, \n",
    "    fairness, and human-centric design.\n",
    "    ",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_keeps_line_layout() {
        let lines: Vec<&str> = SAMPLE_TEXT.split('\n').collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "");
        assert!(lines[1].starts_with("    Artificial"));
        assert!(lines[1].ends_with("society. "));
        assert_eq!(lines[6], "    ");
        assert!(lines[13].ends_with("design."));
        assert_eq!(lines[14], "    ");
        assert!(lines[1..13].iter().all(|line| line.ends_with(' ')));
    }
}
