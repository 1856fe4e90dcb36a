//! 変更通知
//!
//! フォーカス移動や行構造の変化を描画層などの観測者へ配信する

/// リスナーの一意識別子
pub type ListenerId = usize;

/// バッファ変更イベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// フォーカス行が設定された
    FocusChanged { focus: usize },
    /// 行の追加・削除・結合が起きた（`start` 以降が影響を受ける）
    LinesChanged { start: usize },
    /// 保存が完了した
    Saved { lines: usize },
}

/// 変更リスナー
pub trait ChangeListener {
    fn on_change(&mut self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ChangeEvent),
{
    fn on_change(&mut self, event: &ChangeEvent) {
        self(event);
    }
}

/// 登録済みリスナーへイベントを配る
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
    next_id: ListenerId,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// リスナーを登録
    pub fn add_listener(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// リスナーを解除
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &ChangeEvent) {
        for (_, listener) in &mut self.listeners {
            listener.on_change(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_to_all_listeners_until_removed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        let sink = Rc::clone(&seen);
        let id = notifier.add_listener(Box::new(move |event: &ChangeEvent| {
            sink.borrow_mut().push(event.clone());
        }));

        notifier.notify(&ChangeEvent::FocusChanged { focus: 2 });
        assert!(notifier.remove_listener(id));
        notifier.notify(&ChangeEvent::FocusChanged { focus: 3 });

        assert_eq!(*seen.borrow(), vec![ChangeEvent::FocusChanged { focus: 2 }]);
        assert_eq!(notifier.listener_count(), 0);
    }
}
