use super::*;

const LIMIT: usize = 1 << 30;

#[test]
fn targets_use_rgba_and_linear_filtering() {
    let pool = RenderTargetPool::new(8, 4, LIMIT).unwrap();
    for which in [Which::Buffer1, Which::Buffer2] {
        let d = pool.get(which).desc();
        assert_eq!((d.width, d.height), (8, 4));
        assert_eq!(d.format, PixelFormat::Rgba8Premul);
        assert_eq!(d.min_filter, FilterMode::Linear);
        assert_eq!(d.mag_filter, FilterMode::Linear);
        assert_eq!(pool.get(which).data().len(), 8 * 4 * 4);
    }
}

#[test]
fn swap_and_retarget_alias_one_of_the_pair() {
    let mut pool = RenderTargetPool::new(2, 2, LIMIT).unwrap();
    assert_eq!(pool.which(), Which::Buffer1);
    pool.swap();
    assert_eq!(pool.which(), Which::Buffer2);
    pool.swap();
    assert_eq!(pool.which(), Which::Buffer1);
    pool.retarget(Which::Buffer2);
    assert_eq!(pool.which(), Which::Buffer2);
}

#[test]
fn split_pass_reads_current_and_writes_other() {
    let mut pool = RenderTargetPool::new(1, 1, LIMIT).unwrap();
    pool.current_mut().clear([1, 2, 3, 4]);
    {
        let (read, write) = pool.split_pass();
        write.data_mut().copy_from_slice(read.data());
        write.data_mut()[0] = 9;
    }
    assert_eq!(pool.current().data(), &[1, 2, 3, 4]);
    assert_eq!(pool.other().data(), &[9, 2, 3, 4]);

    pool.swap();
    let (read, _) = pool.split_pass();
    assert_eq!(read.data(), &[9, 2, 3, 4]);
}

#[test]
fn resize_reallocates_and_resets_current() {
    let mut pool = RenderTargetPool::new(4, 4, LIMIT).unwrap();
    pool.current_mut().clear([255, 255, 255, 255]);
    pool.swap();

    pool.resize(4, 4).unwrap();
    assert_eq!(pool.which(), Which::Buffer1);
    assert!(pool.current().data().iter().all(|&b| b == 0));

    pool.resize(6, 3).unwrap();
    assert_eq!(pool.size(), (6, 3));
    assert_eq!(pool.get(Which::Buffer2).desc().width, 6);
}

#[test]
fn failed_resize_keeps_previous_pair() {
    let mut pool = RenderTargetPool::new(4, 4, LIMIT).unwrap();
    pool.current_mut().clear([7, 7, 7, 7]);

    let err = pool.resize(0, 10).unwrap_err();
    assert!(matches!(err, FrameStackError::TargetAllocation(_)));
    let err = pool.resize(70_000, 10).unwrap_err();
    assert!(matches!(err, FrameStackError::TargetAllocation(_)));

    assert_eq!(pool.size(), (4, 4));
    assert_eq!(pool.current().data()[0], 7);
}

#[test]
fn byte_limit_is_enforced_for_the_pair() {
    let one = TargetDesc::rgba_linear(16, 16).byte_len();
    assert!(RenderTargetPool::new(16, 16, one * 2).is_ok());
    assert!(matches!(
        RenderTargetPool::new(16, 16, one * 2 - 1),
        Err(FrameStackError::TargetAllocation(_))
    ));
}

#[test]
fn copy_from_requires_matching_size() {
    let mut a = RenderTarget::allocate(TargetDesc::rgba_linear(2, 2)).unwrap();
    let mut b = RenderTarget::allocate(TargetDesc::rgba_linear(2, 2)).unwrap();
    let c = RenderTarget::allocate(TargetDesc::rgba_linear(3, 2)).unwrap();
    b.clear([5, 5, 5, 5]);
    a.copy_from(&b).unwrap();
    assert_eq!(a.to_frame().pixel(1, 1), Some([5, 5, 5, 5]));
    assert!(a.copy_from(&c).is_err());
}
