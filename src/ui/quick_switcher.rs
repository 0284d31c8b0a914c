//! Quick switcher overlay (Ctrl+K) for jumping to channels, DMs and guilds.

use eframe::egui::{self, Color32, Key};

use crate::cache::Cache;
use crate::gateway::ChannelId;
use crate::ui::theme::Palette;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Channel,
    DirectMessage,
    Guild,
}

impl EntryKind {
    fn icon(self) -> &'static str {
        match self {
            EntryKind::Channel => "#",
            EntryKind::DirectMessage => "@",
            EntryKind::Guild => "■",
        }
    }
}

/// One row in the switcher. Guild entries target the guild's first channel.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitcherEntry {
    pub kind: EntryKind,
    pub target: ChannelId,
    pub label: String,
    pub subtitle: String,
}

/// Precompute the switcher entries from the cache.
pub fn build_entries(cache: &Cache) -> Vec<SwitcherEntry> {
    let mut entries = Vec::new();
    for guild in cache.guilds() {
        let channels = cache.guild_channels(guild.id);
        if let Some(first) = channels.first() {
            entries.push(SwitcherEntry {
                kind: EntryKind::Guild,
                target: first.id,
                label: guild.name.clone(),
                subtitle: format!("{} channels", channels.len()),
            });
        }
        for channel in channels {
            entries.push(SwitcherEntry {
                kind: EntryKind::Channel,
                target: channel.id,
                label: channel.title(),
                subtitle: guild.name.clone(),
            });
        }
    }
    for channel in cache.private_channels() {
        entries.push(SwitcherEntry {
            kind: EntryKind::DirectMessage,
            target: channel.id,
            label: channel.title(),
            subtitle: "Direct Message".to_string(),
        });
    }
    entries
}

/// Case-insensitive substring filter. Prefix matches come first, then the
/// rest alphabetically; an empty query keeps every entry in its list order.
pub fn filter_entries<'a>(entries: &'a [SwitcherEntry], query: &str) -> Vec<&'a SwitcherEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }

    let mut matches: Vec<(bool, String, &SwitcherEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let label = entry.label.to_lowercase();
            label
                .contains(&query)
                .then(|| (label.starts_with(&query), label, entry))
        })
        .collect();
    matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    matches.into_iter().map(|(_, _, entry)| entry).collect()
}

#[derive(Default)]
pub struct QuickSwitcher {
    pub visible: bool,
    pub query: String,
    pub selected_index: usize,
}

impl QuickSwitcher {
    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.query.clear();
        self.selected_index = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.query.clear();
        self.selected_index = 0;
    }

    /// Move the highlighted row, staying within `len` rows.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let idx = self.selected_index as isize + delta;
        self.selected_index = idx.clamp(0, len as isize - 1) as usize;
    }

    /// Render the overlay. Returns the channel the user picked, if any.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        entries: &[SwitcherEntry],
        palette: &Palette,
    ) -> Option<ChannelId> {
        if !self.visible {
            return None;
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.hide();
            return None;
        }

        let matches = filter_entries(entries, &self.query);
        if self.selected_index >= matches.len() {
            self.selected_index = 0;
        }

        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            if let Some(entry) = matches.get(self.selected_index) {
                let target = entry.target;
                self.hide();
                return Some(target);
            }
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowDown)) {
            self.move_selection(1, matches.len());
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowUp)) {
            self.move_selection(-1, matches.len());
        }

        let mut picked: Option<ChannelId> = None;
        let mut hovered: Option<usize> = None;

        egui::Window::new("Quick Switcher")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 100.0))
            .fixed_size(egui::vec2(500.0, 400.0))
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(palette.surface[6])
                    .stroke(egui::Stroke::new(1.0, palette.border_strong))
                    .corner_radius(8.0),
            )
            .show(ctx, |ui| {
                ui.add_space(12.0);
                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.query)
                        .hint_text("Where would you like to go?")
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Heading),
                );
                search.request_focus();
                ui.add_space(8.0);
                ui.separator();

                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    if matches.is_empty() {
                        ui.add_space(40.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("No matches found").color(palette.text_muted),
                            );
                        });
                        return;
                    }
                    for (i, entry) in matches.iter().enumerate() {
                        let response =
                            render_row(ui, entry, i == self.selected_index, palette);
                        if response.clicked() {
                            picked = Some(entry.target);
                        }
                        if response.hovered() {
                            hovered = Some(i);
                        }
                    }
                });

                ui.separator();
                ui.label(
                    egui::RichText::new("↑↓ Navigate   ↵ Select   Esc Close")
                        .size(11.0)
                        .color(palette.text_muted),
                );
            });

        if let Some(i) = hovered {
            self.selected_index = i;
        }
        if picked.is_some() {
            self.hide();
        }
        picked
    }
}

fn render_row(
    ui: &mut egui::Ui,
    entry: &SwitcherEntry,
    is_selected: bool,
    palette: &Palette,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 44.0), egui::Sense::click());

    let bg = if is_selected {
        palette.surface[4]
    } else if response.hovered() {
        palette.surface[3]
    } else {
        Color32::TRANSPARENT
    };
    ui.painter().rect_filled(rect, 6.0, bg);

    let painter = ui.painter();
    painter.text(
        egui::pos2(rect.min.x + 20.0, rect.center().y),
        egui::Align2::CENTER_CENTER,
        entry.kind.icon(),
        egui::FontId::proportional(18.0),
        palette.text_muted,
    );
    painter.text(
        egui::pos2(rect.min.x + 44.0, rect.center().y - 7.0),
        egui::Align2::LEFT_CENTER,
        &entry.label,
        egui::FontId::proportional(15.0),
        palette.text_primary,
    );
    painter.text(
        egui::pos2(rect.min.x + 44.0, rect.center().y + 9.0),
        egui::Align2::LEFT_CENTER,
        &entry.subtitle,
        egui::FontId::proportional(11.5),
        palette.text_muted,
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fixtures;

    fn labels(entries: &[&SwitcherEntry]) -> Vec<String> {
        entries.iter().map(|e| e.label.clone()).collect()
    }

    #[test]
    fn test_build_entries_from_cache() {
        let entries = build_entries(&fixtures::loaded());
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].kind, EntryKind::Guild);
        assert_eq!(entries[0].label, "Rustaceans");
        assert_eq!(entries[0].target, ChannelId(100));
        assert_eq!(entries[1].label, "general");
        assert_eq!(entries[2].label, "help");
        assert_eq!(entries[3].kind, EntryKind::DirectMessage);
        assert_eq!(entries[3].label, "dana");
        assert_eq!(entries[3].target, ChannelId(300));
    }

    #[test]
    fn test_empty_query_lists_everything() {
        let entries = build_entries(&fixtures::loaded());
        assert_eq!(filter_entries(&entries, "").len(), entries.len());
        assert_eq!(filter_entries(&entries, "   ").len(), entries.len());
    }

    #[test]
    fn test_prefix_matches_first() {
        let entries = build_entries(&fixtures::loaded());
        assert_eq!(labels(&filter_entries(&entries, "EL")), vec!["help"]);

        // No label starts with "a"; all matches sort alphabetically.
        assert_eq!(
            labels(&filter_entries(&entries, "a")),
            vec!["dana", "general", "Rustaceans"]
        );

        assert_eq!(
            labels(&filter_entries(&entries, "r")),
            vec!["Rustaceans", "general"]
        );
        assert!(filter_entries(&entries, "zzz").is_empty());
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut switcher = QuickSwitcher::default();
        switcher.show();
        switcher.move_selection(-1, 3);
        assert_eq!(switcher.selected_index, 0);
        switcher.move_selection(5, 3);
        assert_eq!(switcher.selected_index, 2);
        switcher.move_selection(1, 0);
        assert_eq!(switcher.selected_index, 0);
    }

    #[test]
    fn test_toggle_resets_query() {
        let mut switcher = QuickSwitcher::default();
        switcher.toggle();
        assert!(switcher.visible);
        switcher.query = "gen".into();
        switcher.selected_index = 2;
        switcher.toggle();
        assert!(!switcher.visible);
        assert!(switcher.query.is_empty());
        assert_eq!(switcher.selected_index, 0);
    }
}
