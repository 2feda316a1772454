//! Integration tests for fluent-canvas.

use fluent_canvas::{
    layout, math, point_list, shapes, BreakMode, Call, Canvas, CanvasError, EllipseParams,
    FillRule, LayoutOptions, NumberProperty, Paint, PointElement, RecordingContext, RectParams,
    RenderingContext2d, TextBlockOptions, TextProperty,
};
use kurbo::Point;
use rstest::rstest;
use std::f64::consts::PI;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn canvas(density: f64) -> Canvas<RecordingContext> {
    Canvas::<RecordingContext>::builder()
        .density(density)
        .build(Some(RecordingContext::new(200, 100)))
        .unwrap()
}

/// A colored fillRect sets the style once and then fills once.
#[test]
fn test_fill_rect_with_color() {
    init_logger();
    let mut canvas = canvas(1.0);
    canvas.fill_rect_with(0.0, 0.0, 200.0, 100.0, "red");

    assert_eq!(
        canvas.context().calls(),
        &[
            Call::SetFillStyle(Paint::Color("red".to_string())),
            Call::FillRect(RectParams::new(0.0, 0.0, 200.0, 100.0)),
        ]
    );
}

#[test]
fn test_missing_context() {
    let result = Canvas::<RecordingContext>::builder().build(None::<RecordingContext>);
    assert!(matches!(result, Err(CanvasError::ContextUnavailable)));
}

#[rstest]
#[case(0.5)]
#[case(1.0)]
#[case(1.5)]
#[case(3.0)]
#[case(7.3)]
fn test_line_width_round_trip(#[case] density: f64) {
    let mut canvas = canvas(1.0);
    for width in [0.1, 1.0, 2.7, 13.37, 1e-3] {
        canvas.set_density(density).set_line_width(width);
        assert_eq!(canvas.line_width(), width);
    }
}

#[rstest]
#[case(0.5)]
#[case(1.0)]
#[case(1.1)]
#[case(1.5)]
#[case(3.0)]
#[case(7.3)]
fn test_font_size_round_trip(#[case] density: f64) {
    let mut canvas = canvas(1.0);
    canvas.set_font("italic 12px serif");
    for size in [11.0, 2.7, 13.37, 0.1, 37.5, 4e-7] {
        canvas.set_density(density).set_font_size(size);
        assert_eq!(canvas.font_size().map(|s| s.value), Some(size));
        assert_eq!(canvas.font_style().as_deref(), Some("italic"));
    }
}

#[test]
fn test_font_size_after_external_font_change() {
    let mut canvas = canvas(2.0);
    canvas.set_font_size(2.7);
    canvas
        .context_mut()
        .set_text(TextProperty::Font, "normal normal normal 30px serif");
    assert_eq!(canvas.font_size().map(|s| s.value), Some(15.0));
}

#[test]
fn test_all_lengths_round_trip() {
    let mut canvas = canvas(1.0);
    canvas.set_density(3.0);
    for property in NumberProperty::ALL {
        canvas.set_number_property(property, 0.7);
        assert_eq!(canvas.number_property(property), 0.7);
        let raw = canvas.context().number(property);
        if property.is_length() {
            assert!((raw - 2.1).abs() < 1e-12);
        } else {
            assert_eq!(raw, 0.7);
        }
    }
}

#[test]
fn test_save_restore_across_density_change() {
    let mut canvas = canvas(2.0);
    canvas
        .set_line_width(3.0)
        .set_font("14px serif")
        .save()
        .set_density(1.0)
        .set_line_width(9.0);
    assert_eq!(canvas.line_width(), 9.0);

    canvas.restore();
    assert_eq!(canvas.density(), 2.0);
    assert_eq!(canvas.line_width(), 3.0);
    assert_eq!(canvas.font(), "normal normal normal 14px serif");
    assert_eq!(canvas.context().number(NumberProperty::LineWidth), 6.0);
}

#[test]
fn test_point_encodings_plot_identically() {
    let flat = point_list([0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
    let tuples = point_list([[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
    let objects = point_list([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    let mut recorded = Vec::new();
    for points in [&flat, &tuples, &objects] {
        let mut canvas = canvas(2.0);
        canvas.stroke_path_with(points, "black").unwrap();
        recorded.push(canvas.into_inner().take_calls());
    }
    assert_eq!(recorded[0], recorded[1]);
    assert_eq!(recorded[1], recorded[2]);
    assert!(recorded[0].contains(&Call::LineTo(20.0, 20.0)));
}

#[test]
fn test_odd_flat_list_rejected() {
    let mut canvas = canvas(1.0);
    let result = canvas.plot_path(&point_list([0.0, 0.0, 1.0, 1.0, 2.0]));
    assert!(matches!(result, Err(CanvasError::MalformedPointList { .. })));
}

#[test]
fn test_mixed_list_rejected() {
    let mut canvas = canvas(1.0);
    let points = vec![
        PointElement::from((0.0, 0.0)),
        PointElement::from([1.0, 1.0]),
    ];
    assert!(canvas.fill_path(&points).is_err());
    assert!(canvas.context().calls().is_empty());
}

#[test]
fn test_math_helpers() {
    assert_eq!(math::radians_from_degrees(180.0), PI);
    assert_eq!(math::degrees_from_radians(PI), 180.0);
    assert_eq!(math::percent_from_fraction(0.75), 75.0);
    assert!(matches!(
        math::angle(&[1.0]),
        Err(CanvasError::InvalidArgumentCount { .. })
    ));
}

#[test]
fn test_three_point_star_is_triangle() {
    let center = Point::new(50.0, 50.0);
    assert_eq!(
        shapes::star(center, 20.0, 3, false),
        shapes::regular_polygon(center, 20.0, 3, false)
    );

    let mut star = canvas(1.0);
    star.plot_star(50.0, 50.0, 20.0, 3, true);
    let mut polygon = canvas(1.0);
    polygon.plot_polygon(50.0, 50.0, 20.0, 3, true);
    assert_eq!(star.context().calls(), polygon.context().calls());
}

#[test]
fn test_rounded_rect_radius_never_exceeds_half_side() {
    let mut canvas = canvas(1.0);
    canvas.plot_rounded_rect(0.0, 0.0, 10.0, 10.0, 999.0);
    let radii: Vec<f64> = canvas
        .context()
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::ArcTo(params) => Some(params.radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii.len(), 4);
    assert!(radii.iter().all(|&r| r <= 5.0));
}

#[test]
fn test_ellipse_fallback_restores_transform() {
    let mut canvas = Canvas::new(RecordingContext::new(100, 100).with_native_ellipse(false));
    canvas
        .translate(5.0, 5.0)
        .fill_ellipse_with(&EllipseParams::full(20.0, 20.0, 10.0, 5.0), "teal");
    assert_eq!(
        canvas.get_transform(),
        kurbo::Affine::translate((5.0, 5.0))
    );
    assert_eq!(canvas.context().save_depth(), 0);
    assert!(canvas.context().calls().contains(&Call::Scale(1.0, 0.5)));
    assert_eq!(
        canvas.context().calls().last(),
        Some(&Call::Fill(FillRule::NonZero))
    );
}

#[test]
fn test_fallback_ellipse_hit_testing() {
    let mut canvas = Canvas::new(RecordingContext::new(100, 100).with_native_ellipse(false));
    canvas
        .begin_path()
        .plot_ellipse(&EllipseParams::full(50.0, 40.0, 20.0, 10.0));

    assert!(canvas.is_point_in_path(50.0, 40.0));
    assert!(canvas.is_point_in_path(65.0, 45.0));
    assert!(!canvas.is_point_in_path(50.0, 60.0));
    assert!(!canvas.is_point_in_path(5.0, 5.0));
}

#[rstest]
#[case(BreakMode::Normal)]
#[case(BreakMode::BreakWord)]
#[case(BreakMode::BreakAll)]
fn test_layout_line_counts(#[case] break_mode: BreakMode) {
    let mut measure = |s: &str| s.chars().count() as f64 * 10.0;
    let options = LayoutOptions {
        max_width: None,
        line_height: 10.0,
        break_mode,
    };
    assert_eq!(layout("a b c", &options, &mut measure).len(), 1);
    assert_eq!(layout("a\nb", &options, &mut measure).len(), 2);

    let narrow = LayoutOptions {
        max_width: Some(1000.0),
        ..options
    };
    assert_eq!(layout("a\nb", &narrow, &mut measure).len(), 2);
}

#[test]
fn test_overlong_word_by_break_mode() {
    let mut measure = |s: &str| s.chars().count() as f64 * 10.0;
    let options = |break_mode| LayoutOptions {
        max_width: Some(30.0),
        line_height: 10.0,
        break_mode,
    };
    assert_eq!(
        layout("extraordinary", &options(BreakMode::Normal), &mut measure).len(),
        1
    );
    assert!(layout("extraordinary", &options(BreakMode::BreakWord), &mut measure).len() > 1);
}

#[test]
fn test_repeat_and_for_each() {
    let mut canvas = canvas(1.0);
    let mut seen = Vec::new();
    canvas
        .repeat(&[0.0, 3.0], |c, i| {
            seen.push(i);
            c.fill_rect(i * 10.0, 0.0, 5.0, 5.0);
        })
        .unwrap()
        .for_each(["red", "green"], |c, color, i| {
            c.fill_circle_with(i as f64 * 10.0, 50.0, 4.0, color);
        });
    assert_eq!(seen, vec![0.0, 1.0, 2.0]);

    let fills = canvas
        .context()
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::FillRect(_) | Call::Fill(_)))
        .count();
    assert_eq!(fills, 5);

    let mut halted = Vec::new();
    canvas
        .repeat(&[0.0, 3.0], |_, i| {
            halted.push(i);
            i != 1.0
        })
        .unwrap();
    assert_eq!(halted, vec![0.0, 1.0]);
}

#[test]
fn test_text_block_at_density() {
    let mut canvas = canvas(2.0);
    canvas
        .set_font("10px monospace")
        .fill_text_block(
            "one two three",
            0.0,
            10.0,
            &TextBlockOptions {
                max_width: Some(70.0),
                line_height: Some(15.0),
                break_mode: BreakMode::Normal,
            },
        );
    let texts: Vec<(String, f64)> = canvas
        .context()
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::FillText { text, y, .. } => Some((text.clone(), *y)),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            ("one two".to_string(), 20.0),
            ("three".to_string(), 50.0),
        ]
    );
    assert_eq!(
        canvas.context().text(TextProperty::Font),
        "normal normal normal 20px monospace"
    );
}
