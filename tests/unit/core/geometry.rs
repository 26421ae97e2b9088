use super::*;

#[test]
fn padding_merge_keeps_unspecified_sides() {
    let mut padding = Padding {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };

    assert!(padding.merge(PaddingUpdate::top(10.0)));
    assert!(padding.merge(PaddingUpdate::left(5.0)));

    assert_eq!(
        padding,
        Padding {
            top: 10.0,
            right: 2.0,
            bottom: 3.0,
            left: 5.0,
        }
    );
}

#[test]
fn padding_merge_is_order_independent_per_field() {
    let mut a = Padding::default();
    a.merge(PaddingUpdate::top(10.0));
    a.merge(PaddingUpdate::bottom(7.0));

    let mut b = Padding::default();
    b.merge(PaddingUpdate::bottom(7.0));
    b.merge(PaddingUpdate::top(10.0));

    assert_eq!(a, b);
}

#[test]
fn padding_merge_reports_no_change() {
    let mut padding = Padding::uniform(4.0);
    assert!(!padding.merge(PaddingUpdate::top(4.0)));
    assert!(!padding.merge(PaddingUpdate::default()));
}

#[test]
fn rect_translate_and_size() {
    let rect = Rect::new(10.0, 20.0, 30.0, 40.0).translate(5.0, -5.0);
    assert_eq!(rect.left, 15.0);
    assert_eq!(rect.top, 15.0);
    assert_eq!(rect.width(), 30.0);
    assert_eq!(rect.height(), 40.0);
}

#[test]
fn expanded_adds_margin_everywhere() {
    let padding = Padding {
        top: 10.0,
        ..Padding::default()
    }
    .expanded(5.0);
    assert_eq!(padding, Padding {
        top: 15.0,
        right: 5.0,
        bottom: 5.0,
        left: 5.0,
    });
}

#[test]
fn padding_combined_adds_each_side() {
    let base = Padding {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };
    assert_eq!(
        base.combined(Padding::uniform(10.0)),
        Padding {
            top: 11.0,
            right: 12.0,
            bottom: 13.0,
            left: 14.0,
        }
    );
}
