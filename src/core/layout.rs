use crate::core::{Canvas, RenderedReport, ReportLayout, Team, TeamRoster, TextStyle};
use crate::utils::error::Result;

pub fn heading_line(number: usize) -> String {
    format!("Team {}", number)
}

/// Body lines of one team block, in drawing order.
pub fn member_lines(team: &Team) -> Vec<String> {
    let mut lines: Vec<String> = team
        .developers
        .iter()
        .enumerate()
        .map(|(i, dev)| format!("Developer {}: {}", i + 1, dev.name()))
        .collect();
    lines.push(format!("Business Analyst: {}", team.business_analyst.name()));
    lines.push(format!("Data Analyst: {}", team.data_analyst.name()));
    lines
}

/// Draws every team onto `canvas`, starting a fresh page whenever the next
/// block would cross the bottom margin. A block is never split across pages.
pub fn render_roster<C: Canvas>(
    roster: &TeamRoster,
    layout: &ReportLayout,
    mut canvas: C,
) -> Result<RenderedReport> {
    let mut cursor = layout.top_margin;
    let mut page_count = 1;
    let mut any_drawn = false;

    for (number, team) in roster.numbered() {
        let footprint = layout.block_footprint(team.member_count());
        if any_drawn && cursor + footprint > layout.usable_bottom() {
            canvas.add_page()?;
            page_count += 1;
            cursor = layout.top_margin;
        }

        canvas.draw_text(
            &heading_line(number),
            TextStyle::Heading,
            layout.left_margin,
            cursor,
        )?;
        cursor += layout.heading_advance;

        for line in member_lines(team) {
            canvas.draw_text(&line, TextStyle::Body, layout.member_indent, cursor)?;
            cursor += layout.line_advance;
        }

        cursor += layout.trailing_gap;
        any_drawn = true;
    }

    let bytes = canvas.finish()?;
    tracing::debug!(
        "Rendered {} team(s) on {} page(s), {} bytes",
        roster.len(),
        page_count,
        bytes.len()
    );

    Ok(RenderedReport {
        bytes,
        team_count: roster.len(),
        page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grouping::group_teams;
    use crate::core::{Record, RolePools};
    use crate::utils::error::RosterError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct DrawnLine {
        page: usize,
        text: String,
        style: TextStyle,
        x: f32,
        y: f32,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        page: usize,
        lines: Rc<RefCell<Vec<DrawnLine>>>,
        fail_on_draw: bool,
    }

    impl Canvas for RecordingCanvas {
        fn add_page(&mut self) -> Result<()> {
            self.page += 1;
            Ok(())
        }

        fn draw_text(&mut self, text: &str, style: TextStyle, x: f32, y: f32) -> Result<()> {
            if self.fail_on_draw {
                return Err(RosterError::RenderFailure {
                    message: "canvas exhausted".to_string(),
                });
            }
            self.lines.borrow_mut().push(DrawnLine {
                page: self.page,
                text: text.to_string(),
                style,
                x,
                y,
            });
            Ok(())
        }

        fn finish(self) -> Result<Vec<u8>> {
            let bytes: Vec<u8> = self
                .lines
                .borrow()
                .iter()
                .flat_map(|l| l.text.bytes())
                .collect();
            Ok(bytes)
        }
    }

    fn roster(teams: usize) -> TeamRoster {
        let make = |prefix: &str, count: usize| -> Vec<Record> {
            (1..=count)
                .map(|i| Record::with_name(&format!("{}{}", prefix, i)))
                .collect()
        };
        group_teams(RolePools::new(
            make("dev", teams * 3),
            make("ba", teams),
            make("da", teams),
        ))
    }

    fn draw(roster: &TeamRoster, layout: &ReportLayout) -> Vec<DrawnLine> {
        let canvas = RecordingCanvas::default();
        let lines = Rc::clone(&canvas.lines);
        render_roster(roster, layout, canvas).unwrap();
        let drawn = lines.borrow().clone();
        drawn
    }

    #[test]
    fn test_team_block_lines_and_labels() {
        let lines = draw(&roster(1), &ReportLayout::default());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();

        assert_eq!(
            texts,
            vec![
                "Team 1",
                "Developer 1: dev1",
                "Developer 2: dev2",
                "Developer 3: dev3",
                "Business Analyst: ba1",
                "Data Analyst: da1",
            ]
        );
        assert_eq!(lines[0].style, TextStyle::Heading);
        assert_eq!(lines[0].x, 50.0);
        assert_eq!(lines[0].y, 50.0);
        assert_eq!(lines[1].style, TextStyle::Body);
        assert_eq!(lines[1].x, 70.0);
        assert_eq!(lines[1].y, 75.0);
        assert_eq!(lines[4].y, 135.0);
        assert_eq!(lines[5].y, 155.0);
    }

    #[test]
    fn test_page_break_before_block_that_would_overflow() {
        // 165pt per block on a 742pt usable page: four blocks fit, the fifth moves.
        let lines = draw(&roster(5), &ReportLayout::default());

        let heading_pages: Vec<(usize, f32)> = lines
            .iter()
            .filter(|l| l.style == TextStyle::Heading)
            .map(|l| (l.page, l.y))
            .collect();
        assert_eq!(
            heading_pages,
            vec![(0, 50.0), (0, 215.0), (0, 380.0), (0, 545.0), (1, 50.0)]
        );
    }

    #[test]
    fn test_no_team_block_spans_two_pages() {
        let layout = ReportLayout {
            page_height: 600.0,
            ..ReportLayout::default()
        };
        let lines = draw(&roster(9), &layout);

        for block in lines.chunks(6) {
            let page = block[0].page;
            assert!(block.iter().all(|l| l.page == page), "split block: {:?}", block);
            assert!(block.iter().all(|l| l.y <= layout.usable_bottom()));
        }
        assert_eq!(lines.last().unwrap().page, 2);
    }

    #[test]
    fn test_render_reports_team_and_page_counts() {
        let report = render_roster(&roster(9), &ReportLayout::default(), RecordingCanvas::default())
            .unwrap();
        assert_eq!(report.team_count, 9);
        assert_eq!(report.page_count, 3);
    }

    #[test]
    fn test_empty_roster_renders_single_blank_page() {
        let report = render_roster(
            &TeamRoster::default(),
            &ReportLayout::default(),
            RecordingCanvas::default(),
        )
        .unwrap();
        assert_eq!(report.team_count, 0);
        assert_eq!(report.page_count, 1);
        assert!(report.bytes.is_empty());
    }

    #[test]
    fn test_oversized_block_still_drawn_on_first_page() {
        let layout = ReportLayout {
            page_height: 120.0,
            ..ReportLayout::default()
        };
        let lines = draw(&roster(3), &layout);
        let headings: Vec<(usize, f32)> = lines
            .iter()
            .filter(|l| l.style == TextStyle::Heading)
            .map(|l| (l.page, l.y))
            .collect();
        // each block opens its own page at the top margin
        assert_eq!(headings, vec![(0, 50.0), (1, 50.0), (2, 50.0)]);

        let report = render_roster(&roster(3), &layout, RecordingCanvas::default()).unwrap();
        assert_eq!(report.page_count, 3);
    }

    #[test]
    fn test_canvas_failure_propagates() {
        let canvas = RecordingCanvas {
            fail_on_draw: true,
            ..RecordingCanvas::default()
        };
        let err = render_roster(&roster(1), &ReportLayout::default(), canvas).unwrap_err();
        assert!(matches!(err, RosterError::RenderFailure { .. }));
    }
}
