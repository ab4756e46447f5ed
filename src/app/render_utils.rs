use eframe::egui::{Pos2, Rect, Vec2};

use crate::chart::ChartEvent;

/// Frame-clock ticks: one per 60 Hz frame, never more than four per paint.
pub(super) fn ticks_for_frame(delta_seconds: f32) -> usize {
    (delta_seconds * 60.0).round().clamp(1.0, 4.0) as usize
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn chart_to_screen(origin: Pos2, chart: Pos2) -> Pos2 {
    origin + chart.to_vec2()
}

pub(super) fn screen_to_chart(origin: Pos2, screen: Pos2) -> Pos2 {
    (screen - origin).to_pos2()
}

pub(super) fn inner_origin(outer: Rect, margin: Vec2) -> Pos2 {
    outer.min + margin
}

/// Events that move hover from `hovered` to the circle under the pointer.
pub(super) fn hover_events(
    hovered: Option<usize>,
    hit: Option<usize>,
    pointer: Option<Pos2>,
) -> Vec<ChartEvent> {
    match (hovered, hit, pointer) {
        (Some(current), Some(next), Some(pointer)) if current == next => {
            vec![ChartEvent::PointerMove { pointer }]
        }
        (Some(_), Some(index), Some(pointer)) => vec![
            ChartEvent::PointerLeave,
            ChartEvent::PointerEnter { index, pointer },
        ],
        (None, Some(index), Some(pointer)) => vec![ChartEvent::PointerEnter { index, pointer }],
        (Some(_), _, _) => vec![ChartEvent::PointerLeave],
        (None, _, _) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn frame_ticks_follow_refresh_rate() {
        assert_eq!(ticks_for_frame(0.0), 1);
        assert_eq!(ticks_for_frame(1.0 / 60.0), 1);
        assert_eq!(ticks_for_frame(1.0 / 30.0), 2);
        assert_eq!(ticks_for_frame(0.5), 4);
    }

    #[test]
    fn screen_and_chart_coordinates_round_trip() {
        let origin = inner_origin(
            Rect::from_min_size(pos2(20.0, 40.0), vec2(600.0, 425.0)),
            vec2(50.0, 30.0),
        );
        assert_eq!(origin, pos2(70.0, 70.0));
        assert_eq!(chart_to_screen(origin, pos2(265.0, 200.0)), pos2(335.0, 270.0));
        assert_eq!(screen_to_chart(origin, pos2(335.0, 270.0)), pos2(265.0, 200.0));
    }

    #[test]
    fn hover_enters_moves_and_leaves() {
        let pointer = pos2(12.0, 8.0);
        assert_eq!(
            hover_events(None, Some(2), Some(pointer)),
            vec![ChartEvent::PointerEnter { index: 2, pointer }]
        );
        assert_eq!(
            hover_events(Some(2), Some(2), Some(pointer)),
            vec![ChartEvent::PointerMove { pointer }]
        );
        assert_eq!(
            hover_events(Some(2), None, Some(pointer)),
            vec![ChartEvent::PointerLeave]
        );
        assert_eq!(hover_events(Some(2), None, None), vec![ChartEvent::PointerLeave]);
        assert!(hover_events(None, None, Some(pointer)).is_empty());
        assert!(hover_events(None, None, None).is_empty());
    }

    #[test]
    fn hover_switches_between_adjacent_circles() {
        let pointer = pos2(40.0, 20.0);
        assert_eq!(
            hover_events(Some(1), Some(3), Some(pointer)),
            vec![
                ChartEvent::PointerLeave,
                ChartEvent::PointerEnter { index: 3, pointer },
            ]
        );
    }

    #[test]
    fn circles_outside_rect_are_culled() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(50.0, 50.0), 5.0));
        assert!(circle_visible(rect, pos2(-4.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(-6.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(50.0, 200.0), 5.0));
    }
}
