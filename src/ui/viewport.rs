//! ビューポート
//!
//! 本文の表示開始行と横スクロール量。フォーカス行とカーソルが常に見える位置に追従する。

/// 表示範囲の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// 先頭に表示する行（0 始まり）
    pub top: usize,
    /// 左端に表示する列（文字単位）
    pub left: usize,
    pub height: usize,
    pub width: usize,
}

impl Viewport {
    /// 大きさを更新し、フォーカス行とカーソル列が収まるようにずらす
    pub fn follow(&mut self, focus: usize, column: usize, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);

        if focus < self.top {
            self.top = focus;
        } else if focus >= self.top + self.height {
            self.top = focus + 1 - self.height;
        }

        if column < self.left {
            self.left = column;
        } else if column >= self.left + self.width {
            self.left = column + 1 - self.width;
        }
    }

    /// 表示する行の範囲
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.top..self.top + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolls_down_and_back_up() {
        let mut viewport = Viewport::default();
        viewport.follow(3, 0, 10, 80);
        assert_eq!(viewport.top, 0);

        viewport.follow(12, 0, 10, 80);
        assert_eq!(viewport.top, 3);
        assert_eq!(viewport.rows(), 3..13);

        viewport.follow(1, 0, 10, 80);
        assert_eq!(viewport.top, 1);
    }

    #[test]
    fn scrolls_horizontally_for_long_lines() {
        let mut viewport = Viewport::default();
        viewport.follow(0, 100, 10, 40);
        assert_eq!(viewport.left, 61);
        viewport.follow(0, 5, 10, 40);
        assert_eq!(viewport.left, 5);
    }
}
