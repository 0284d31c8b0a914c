//! Right sidebar: members of the active guild grouped by presence.

use eframe::egui::{self, Stroke};

use crate::cache::Cache;
use crate::gateway::{GuildId, Member, Status};
use crate::ui::avatar::render_avatar;
use crate::ui::theme::Palette;

/// Members grouped for display: online, idle, do not disturb, then offline.
/// Empty groups are left out; names sort case-insensitively within a group.
pub fn group_members(cache: &Cache, guild: GuildId) -> Vec<(Status, Vec<&Member>)> {
    let order = [
        Status::Online,
        Status::Idle,
        Status::DoNotDisturb,
        Status::Offline,
    ];
    let members = cache.guild_members(guild);

    order
        .into_iter()
        .filter_map(|status| {
            let mut group: Vec<&Member> = members
                .iter()
                .copied()
                .filter(|m| cache.presence(m.user.id) == status)
                .collect();
            if group.is_empty() {
                return None;
            }
            group.sort_by_key(|m| m.display_name().to_lowercase());
            Some((status, group))
        })
        .collect()
}

pub fn render_member_list(ctx: &egui::Context, cache: &Cache, guild: GuildId, palette: &Palette) {
    let groups = group_members(cache, guild);

    egui::SidePanel::right("members_panel")
        .resizable(true)
        .default_width(200.0)
        .min_width(150.0)
        .frame(
            egui::Frame::new()
                .fill(palette.surface[1])
                .inner_margin(egui::Margin::same(0))
                .stroke(Stroke::new(1.0, palette.border_medium)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for (status, members) in &groups {
                        ui.add_space(14.0);
                        ui.horizontal(|ui| {
                            ui.add_space(16.0);
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} · {}",
                                    status.label().to_uppercase(),
                                    members.len()
                                ))
                                .text_style(egui::TextStyle::Name("section_header".into()))
                                .strong()
                                .color(palette.text_muted),
                            );
                        });
                        ui.add_space(4.0);

                        for member in members {
                            ui.horizontal(|ui| {
                                ui.add_space(12.0);
                                render_avatar(ui, member.user.id, Some(*status), 28.0, palette);
                                ui.add_space(4.0);
                                let color = if *status == Status::Offline {
                                    palette.text_muted
                                } else {
                                    palette.text_secondary
                                };
                                ui.label(
                                    egui::RichText::new(member.display_name()).color(color),
                                );
                            });
                            ui.add_space(2.0);
                        }
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fixtures;
    use crate::gateway::{Presence, UserId};

    #[test]
    fn test_members_grouped_by_presence() {
        let mut cache = fixtures::loaded();
        cache.set_presence(Presence {
            user_id: UserId(3),
            status: Status::Online,
        });

        let groups = group_members(&cache, GuildId(10));
        let summary: Vec<(Status, Vec<&str>)> = groups
            .iter()
            .map(|(s, ms)| (*s, ms.iter().map(|m| m.display_name()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Status::Online, vec!["corro"]),
                (Status::Idle, vec!["Crab"]),
            ]
        );
    }

    #[test]
    fn test_unknown_guild_has_no_groups() {
        let cache = fixtures::loaded();
        assert!(group_members(&cache, GuildId(999)).is_empty());
    }
}
