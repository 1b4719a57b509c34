use scraper::{ElementRef, Node};

/// Splits an ability-text block into display lines.
///
/// Inline `<img>` icons are replaced by their `alt` text. A `<br>` only ends a
/// line when the next thing after it is an icon; a break followed by plain
/// text continues the current line. Tokens within a line are joined with a
/// single space and blank lines are dropped.
pub fn block_lines(block: ElementRef) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut pending_break = false;

    for node in block.descendants().skip(1) {
        match node.value() {
            Node::Element(element) if element.name() == "img" => {
                if pending_break {
                    flush_line(&mut lines, &mut current);
                    pending_break = false;
                }
                let alt = element.attr("alt").unwrap_or("").trim();
                if !alt.is_empty() {
                    current.push(alt.to_string());
                }
            }
            Node::Element(element) if element.name() == "br" => {
                if !current.is_empty() {
                    pending_break = true;
                }
            }
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    pending_break = false;
                    current.push(text.to_string());
                }
            }
            _ => {}
        }
    }
    flush_line(&mut lines, &mut current);

    lines
}

fn flush_line(lines: &mut Vec<String>, current: &mut Vec<String>) {
    let line = current.join(" ");
    current.clear();
    let line = line.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn lines_of(fragment: &str) -> Vec<String> {
        let html = Html::parse_fragment(fragment);
        let selector = Selector::parse(".info-Text").unwrap();
        let block = html.select(&selector).next().unwrap();
        block_lines(block)
    }

    #[test]
    fn test_break_before_icon_starts_new_line() {
        let lines = lines_of(
            r#"<div class="info-Text"><img src="a.png" alt="常時">手札にあるこのメンバーカードのコストは1少なくなる。<br><img src="b.png" alt="常時">このメンバーはバトンタッチで控え室に置けない。</div>"#,
        );
        assert_eq!(
            lines,
            vec![
                "常時 手札にあるこのメンバーカードのコストは1少なくなる。",
                "常時 このメンバーはバトンタッチで控え室に置けない。",
            ]
        );
    }

    #[test]
    fn test_break_before_text_continues_line() {
        let lines = lines_of(
            r#"<div class="info-Text"><img alt="ライブ開始時">ブレード<img alt="ブレード">を得る。<br>（手札のこのカードもこの効果で控え室に置ける。）</div>"#,
        );
        assert_eq!(
            lines,
            vec!["ライブ開始時 ブレード ブレード を得る。 （手札のこのカードもこの効果で控え室に置ける。）"]
        );
    }

    #[test]
    fn test_inline_icons_in_middle_of_text() {
        let lines = lines_of(
            r#"<div class="info-Text"><img alt="ライブ開始時">必要ハートは<img alt="heart0"><img alt="heart0">少なくなる。</div>"#,
        );
        assert_eq!(lines, vec!["ライブ開始時 必要ハートは heart0 heart0 少なくなる。"]);
    }

    #[test]
    fn test_nested_markup_and_leading_breaks() {
        let lines = lines_of(
            "<div class=\"info-Text\"><br><br>\n  <span><b>起動</b> カードを1枚引く。</span><br>\n<br><img alt=\"自動\"><span>  </span>手札を1枚捨てる。<br></div>",
        );
        assert_eq!(lines, vec!["起動 カードを1枚引く。", "自動 手札を1枚捨てる。"]);
    }

    #[test]
    fn test_never_emits_blank_lines() {
        let lines = lines_of(
            r#"<div class="info-Text">   <br><img alt=""><br><img alt="  "><br>   </div>"#,
        );
        assert!(lines.is_empty());

        let lines = lines_of(r#"<div class="info-Text">A<br><img alt="">B<br><img alt=" ">C</div>"#);
        assert_eq!(lines, vec!["A", "B", "C"]);
        assert!(lines.iter().all(|line| !line.trim().is_empty()));
    }
}
