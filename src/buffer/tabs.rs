//! タブ展開と再タブ化
//!
//! 読み込み時はタブをスペースへ展開し、保存時の同一性判定には固定幅の窓で
//! スペースをタブへ畳み戻す `re_tab` を使う。`re_tab` は展開の完全な逆関数ではない
//! （窓境界直前に 2 つのスペースがないタブは復元できず、編集後の内容が偶然別の
//! タブ配置に一致する場合も「未変更」と判定される）。

/// タブを次のタブストップまでのスペースに展開
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    if !text.contains('\t') || tab_size == 0 {
        return text.to_string();
    }

    let mut expanded = String::with_capacity(text.len() + tab_size);
    let mut column = 0usize;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = tab_size - (column % tab_size);
            expanded.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            expanded.push(ch);
            column += 1;
        }
    }
    expanded
}

/// 展開済み文字列をタブストップ単位の窓で走査し、窓の末尾 2 文字がスペースなら
/// その窓の末尾スペースを 1 つのタブに置き換える
///
/// どの窓も該当しなければ入力をそのまま返す。
pub fn re_tab(text: &str, tab_size: usize) -> String {
    if tab_size < 2 {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len());
    let mut window_start = 0usize;
    let mut collapsed = false;

    while window_start + tab_size <= chars.len() {
        let window = &chars[window_start..window_start + tab_size];
        if window[tab_size - 2] == ' ' && window[tab_size - 1] == ' ' {
            let kept = window.iter().rposition(|&ch| ch != ' ').map_or(0, |idx| idx + 1);
            output.extend(&window[..kept]);
            output.push('\t');
            collapsed = true;
        } else {
            output.extend(window);
        }
        window_start += tab_size;
    }

    if !collapsed {
        return text.to_string();
    }

    output.extend(&chars[window_start..]);
    output
}
