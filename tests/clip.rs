use golden_canvas::*;

const WHITE: ColorU8 = ColorU8::from_rgba(255, 255, 255, 255);
const RED: ColorU8 = ColorU8::from_rgba(255, 0, 0, 255);

#[test]
fn circle_clip() {
    let mut surface = Surface::new(100, 100).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.arc(50.0, 50.0, 30.0, 0.0, std::f64::consts::PI * 2.0, false)
        .unwrap();
    ctx.clip();
    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 100.0, 100.0).unwrap();

    assert_eq!(surface.pixel(50, 50).unwrap(), RED);
    assert_eq!(surface.pixel(10, 10).unwrap(), WHITE);
    // Just inside and just outside the arc at the top.
    assert_eq!(surface.pixel(50, 20).unwrap(), RED);
    assert_eq!(surface.pixel(50, 19).unwrap(), WHITE);
}

#[test]
fn clip_intersection_is_order_independent() {
    let build = |first: (f64, f64, f64, f64), second: (f64, f64, f64, f64)| -> ClipMask {
        let mut surface = Surface::new(50, 50).unwrap();
        let mut ctx = Context::new(&mut surface);

        ctx.rect(first.0, first.1, first.2, first.3).unwrap();
        ctx.clip();
        ctx.begin_path();
        ctx.rect(second.0, second.1, second.2, second.3).unwrap();
        ctx.clip();

        ctx.clip_mask().cloned().unwrap()
    };

    let a = (0.0, 0.0, 30.0, 30.0);
    let b = (20.0, 20.0, 30.0, 30.0);

    let ab = build(a, b);
    let ba = build(b, a);
    assert_eq!(ab, ba);

    // The intersection is the overlap square.
    assert!(ab.get(25, 25));
    assert!(!ab.get(10, 10));
    assert!(!ab.get(40, 40));
}

#[test]
fn clip_does_not_shift_rect_edges() {
    // The same fillRect must paint the same pixels whether or not a clip
    // is active.
    let mut surface = Surface::new(20, 20).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.rect(0.0, 0.0, 20.0, 20.0).unwrap();
    ctx.clip();
    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(2.0, 2.0, 6.0, 6.0).unwrap();

    assert_eq!(surface.pixel(2, 2).unwrap(), RED);
    assert_eq!(surface.pixel(7, 7).unwrap(), RED);
    assert_eq!(surface.pixel(8, 8).unwrap(), WHITE);
    assert_eq!(surface.pixel(8, 5).unwrap(), WHITE);
    assert_eq!(surface.pixel(5, 8).unwrap(), WHITE);
}

#[test]
fn clip_is_idempotent() {
    let mut surface = Surface::new(50, 50).unwrap();
    let mut ctx = Context::new(&mut surface);

    ctx.rect(5.0, 5.0, 20.0, 20.0).unwrap();
    ctx.clip();
    let once = ctx.clip_mask().cloned().unwrap();

    ctx.clip();
    let twice = ctx.clip_mask().cloned().unwrap();

    assert_eq!(once, twice);
}

#[test]
fn nested_clips_only_shrink() {
    let mut surface = Surface::new(50, 50).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.rect(0.0, 0.0, 30.0, 50.0).unwrap();
    ctx.clip();
    ctx.begin_path();
    ctx.rect(0.0, 20.0, 50.0, 30.0).unwrap();
    ctx.clip();

    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 50.0, 50.0).unwrap();

    assert_eq!(surface.pixel(10, 30).unwrap(), RED);
    assert_eq!(surface.pixel(10, 10).unwrap(), WHITE);
    assert_eq!(surface.pixel(40, 30).unwrap(), WHITE);
}

#[test]
fn empty_path_clips_everything() {
    let mut surface = Surface::new(20, 20).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.clip();
    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0).unwrap();

    assert!(surface.pixels().iter().all(|p| *p == WHITE));
}

#[test]
fn restore_reverts_the_clip() {
    let mut surface = Surface::new(20, 20).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.save();
    ctx.rect(0.0, 0.0, 5.0, 5.0).unwrap();
    ctx.clip();
    assert!(ctx.clip_mask().is_some());
    ctx.restore();
    assert!(ctx.clip_mask().is_none());

    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0).unwrap();
    assert_eq!(surface.pixel(15, 15).unwrap(), RED);
}

#[test]
fn clip_respects_the_transform() {
    let mut surface = Surface::new(40, 40).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.translate(20.0, 0.0).unwrap();
    ctx.rect(0.0, 0.0, 10.0, 10.0).unwrap();
    ctx.clip();
    ctx.reset_transform();
    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 40.0, 40.0).unwrap();

    assert_eq!(surface.pixel(25, 5).unwrap(), RED);
    assert_eq!(surface.pixel(5, 5).unwrap(), WHITE);
}

#[test]
fn even_odd_clip() {
    let mut surface = Surface::new(20, 20).unwrap();
    surface.fill(WHITE);

    let mut ctx = Context::new(&mut surface);
    ctx.rect(2.0, 2.0, 16.0, 16.0).unwrap();
    ctx.rect(6.0, 6.0, 8.0, 8.0).unwrap();
    ctx.clip_with_rule(FillRule::EvenOdd);

    ctx.set_fill_color(255, 0, 0, 255);
    ctx.fill_rect(0.0, 0.0, 20.0, 20.0).unwrap();

    // The ring is visible, the inner square is clipped out.
    assert_eq!(surface.pixel(4, 10).unwrap(), RED);
    assert_eq!(surface.pixel(10, 10).unwrap(), WHITE);
}
