//! Property-based tests for badge layout and rendering.

use badge_rs_renderer::{BadgeRenderer, BadgeSpec, LogoRef, StyleId};
use proptest::prelude::*;

fn style() -> impl Strategy<Value = StyleId> {
    prop::sample::select(StyleId::ALL.to_vec())
}

fn color() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "red", "blue", "#b3e", "4c1", "rgb(1,2,3)", "hsl(10,20%,30%)", "papayawhip", "bogus",
    ])
    .prop_map(String::from)
}

fn logo() -> impl Strategy<Value = Option<LogoRef>> {
    prop::option::of(
        prop::sample::select(vec!["star", "check", "data:image/png;base64,iVBORw0KGgo="])
            .prop_map(LogoRef::from_token),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ========================
    // Determinism
    // ========================

    #[test]
    fn rendering_is_deterministic(
        label in "\\PC{0,16}",
        message in "\\PC{0,16}",
        style in style(),
    ) {
        let spec = BadgeSpec::new(label, message).with_style(style);
        let renderer = BadgeRenderer::default();
        prop_assert_eq!(renderer.render(&spec), renderer.render(&spec));
        prop_assert_eq!(renderer.render(&spec), BadgeRenderer::default().render(&spec));
    }

    // ========================
    // Geometry
    // ========================

    #[test]
    fn total_width_is_the_sum_of_segments(
        label in "[a-zA-Z0-9 ._-]{0,20}",
        message in "[a-zA-Z0-9 ._-]{1,20}",
        style in style(),
        logo in logo(),
    ) {
        let mut spec = BadgeSpec::new(label, message).with_style(style);
        spec.logo = logo;
        let layout = BadgeRenderer::default().layout(&spec);
        let gap = if style == StyleId::Social { 5 } else { 0 };
        prop_assert_eq!(layout.width, layout.label.width + gap + layout.message.width);
        prop_assert_eq!(layout.message.x, layout.label.width + gap);
    }

    #[test]
    fn empty_label_collapses_in_flat_family(
        message in "[a-z]{1,12}",
        blank in "[ ]{0,3}",
        style in prop::sample::select(vec![StyleId::Flat, StyleId::FlatSquare, StyleId::Plastic]),
    ) {
        let layout = BadgeRenderer::default().layout(&BadgeSpec::new(blank, message).with_style(style));
        prop_assert_eq!(layout.label.width, 0);
        prop_assert!(layout.label_text.is_none());
        prop_assert_eq!(layout.width, layout.message.width);
    }

    #[test]
    fn longer_messages_never_shrink(
        message in "[a-zA-Z0-9]{1,12}",
        suffix in "[a-zA-Z0-9]{1,4}",
        style in style(),
    ) {
        let renderer = BadgeRenderer::default();
        let short = renderer.layout(&BadgeSpec::new("build", message.clone()).with_style(style));
        let long = renderer.layout(&BadgeSpec::new("build", message + &suffix).with_style(style));
        prop_assert!(long.message.width >= short.message.width);
    }

    #[test]
    fn colors_never_move_geometry(
        label in "[a-z]{0,10}",
        message in "[a-z]{1,10}",
        style in style(),
        a in color(),
        b in color(),
    ) {
        let renderer = BadgeRenderer::default();
        let plain = renderer.layout(&BadgeSpec::new(label.clone(), message.clone()).with_style(style));
        let colored = renderer.layout(
            &BadgeSpec::new(label, message)
                .with_style(style)
                .with_color(a)
                .with_label_color(b),
        );
        prop_assert_eq!(plain.width, colored.width);
        prop_assert_eq!(plain.label, colored.label);
        prop_assert_eq!(plain.message, colored.message);
        prop_assert_eq!(plain.label_text, colored.label_text);
        prop_assert_eq!(plain.message_text, colored.message_text);
    }

    #[test]
    fn any_logo_width_or_height_renders(
        logo_width in any::<u32>(),
        height in any::<u32>(),
        style in style(),
    ) {
        let mut spec = BadgeSpec::new("build", "passing")
            .with_style(style)
            .with_logo(LogoRef::from_token("star"))
            .with_height(height);
        spec.logo_width = Some(logo_width);
        let layout = BadgeRenderer::default().layout(&spec);
        prop_assert!(layout.height >= 14 && layout.height <= 200);
        prop_assert!(layout.logo.map_or(0, |logo| logo.width) <= 100);
        let svg = BadgeRenderer::default().render(&spec).into_string();
        prop_assert!(roxmltree::Document::parse(&svg).is_ok());
    }

    // ========================
    // Output well-formedness
    // ========================

    #[test]
    fn arbitrary_text_yields_well_formed_svg(
        label in "\\PC{0,24}",
        message in "\\PC{0,24}",
        style in style(),
    ) {
        let svg = BadgeRenderer::default()
            .render(&BadgeSpec::new(label, message).with_style(style))
            .into_string();
        let doc = roxmltree::Document::parse(&svg);
        prop_assert!(doc.is_ok(), "{:?}\n{}", doc.err(), svg);
    }
}
