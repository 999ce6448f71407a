use nixnet_rs::collection::{Collection, Item, ItemKey};
use nixnet_rs::session::{
    InFrames, LoopbackDriver, OutFrames, PropertyWrite, SinglePointInFrames, SinglePointOutFrames,
};
use nixnet_rs::{
    CanFrame, CanIdentifier, DelayFrame, Error, FrameType, Handle, PropertyId, PropertyValue,
    RawFrame, Result, Timeout, XnetFrame,
};

#[test]
fn collection_indexing() -> Result<()> {
    let driver = LoopbackDriver::with_items(["a", "b", "c"]);
    let items: Collection<'_, _, Item> = Collection::new(&driver, Handle(1));

    let by_index = items.get(1usize)?;
    let by_name = items.get("b")?;
    assert_eq!(by_index, by_name);
    assert_eq!(by_index.handle(), Handle(1));
    assert_eq!(by_index.index(), 1);

    assert!(!items.contains(3usize)?);
    assert!(!items.contains("z")?);
    assert_eq!(items.find("z")?, None);
    assert_eq!(items.names()?, ["a", "b", "c"]);
    assert_eq!(items.len()?, 3);
    assert!(!items.is_empty()?);
    Ok(())
}

#[test]
fn collection_key_errors() {
    let driver = LoopbackDriver::with_items(["a", "b", "c"]);
    let items: Collection<'_, _, Item> = Collection::new(&driver, Handle(1));

    assert_eq!(
        items.by_index(5),
        Err(Error::IndexOutOfRange { index: 5, len: 3 })
    );
    assert_eq!(items.by_name("z"), Err(Error::KeyNotFound("z".to_string())));
    assert_eq!(items.get(ItemKey::Index(2)).map(|i| i.to_string()), Ok("c".to_string()));
}

#[test]
fn collection_detects_driver_drift() {
    let driver = LoopbackDriver::with_items(["a", "b", "c"]);
    let items: Collection<'_, _, Item> = Collection::new(&driver, Handle(1));
    assert_eq!(items.iter().map(|iter| iter.count()), Ok(3));

    driver.set_reported_count(Some(2));
    assert!(matches!(
        items.iter().map(|iter| iter.count()),
        Err(Error::CacheConsistencyViolation { count: 2, .. })
    ));

    driver.set_reported_count(None);
    assert_eq!(items.iter().map(|iter| iter.count()), Ok(3));
}

#[test]
fn empty_session_list() -> Result<()> {
    let driver = LoopbackDriver::new();
    let input = InFrames::new(&driver, Handle(0));
    assert!(input.is_empty()?);
    assert_eq!(input.iter()?.count(), 0);
    assert_eq!(input.read_bytes(240, Timeout::None)?, Vec::<u8>::new());
    Ok(())
}

#[test]
fn loopback_with_echo() -> Result<()> {
    let driver = LoopbackDriver::with_items(["Request", "Response"]).with_echo(true);
    let output = OutFrames::new(&driver, Handle(1));
    let input = InFrames::new(&driver, Handle(2));

    let request = CanFrame::data(CanIdentifier::standard(0x7DF), &[0x02, 0x01, 0x0C]);
    output.write_can([&request], Timeout::WRITE_DEFAULT)?;

    let received: Vec<CanFrame> = input.read_can(4, Timeout::None)?.collect::<Result<_>>()?;
    assert_eq!(received.len(), 1);
    assert!(received[0].echo);
    assert_eq!(received[0].identifier, request.identifier);
    assert_eq!(received[0].payload, request.payload);
    Ok(())
}

#[test]
fn bounded_read_times_out() -> Result<()> {
    let driver = LoopbackDriver::new();
    driver.inject(&[RawFrame::new(1, 0x10, FrameType::CanData, vec![1])])?;
    let input = InFrames::new(&driver, Handle(0));

    assert_eq!(
        input.read_raw(2, Timeout::from_secs(1)).map(|iter| iter.count()),
        Err(Error::Timeout)
    );
    // Nothing was consumed.
    assert_eq!(input.read_raw(1, Timeout::Infinite)?.count(), 1);
    Ok(())
}

#[test]
fn full_queue_rejects_whole_batch() -> Result<()> {
    let driver = LoopbackDriver::new().with_write_capacity(2 * 24);
    let output = OutFrames::new(&driver, Handle(0));
    let frames: Vec<RawFrame> = (0..3)
        .map(|ts| RawFrame::new(ts, 0x10, FrameType::CanData, vec![]))
        .collect();

    assert_eq!(output.write_raw(&frames, Timeout::None), Err(Error::Timeout));
    assert_eq!(driver.queued_bytes(), 0);

    output.write_raw(&frames[..2], Timeout::None)?;
    assert_eq!(driver.queued_bytes(), 48);
    Ok(())
}

#[test]
fn cut_short_write_queues_nothing() -> Result<()> {
    let driver = LoopbackDriver::new();
    let output = OutFrames::new(&driver, Handle(0));
    let frames: Vec<RawFrame> = (0..2)
        .map(|ts| RawFrame::new(ts, 0x10, FrameType::CanData, vec![1, 2]))
        .collect();
    let bytes = nixnet_rs::raw::encode_all(&frames)?;

    assert!(matches!(
        output.write_bytes(&bytes[..40], Timeout::None),
        Err(Error::TruncatedRecord { offset: 24, .. })
    ));
    assert_eq!(driver.queued_bytes(), 0);

    output.write_bytes(&bytes, Timeout::None)?;
    assert_eq!(driver.queued_bytes(), 48);
    Ok(())
}

#[test]
fn single_point_views() -> Result<()> {
    let driver = LoopbackDriver::with_items(["Speed", "Rpm", "Temp"]);
    let output = SinglePointOutFrames::new(&driver, Handle(5));
    let input = SinglePointInFrames::new(&driver, Handle(6));

    let frames: Vec<CanFrame> = (0..3u32)
        .map(|i| CanFrame::data(CanIdentifier::standard(0x100 + i), &[i as u8; 8]))
        .collect();
    output.write_can(&frames)?;

    let read: Vec<CanFrame> = input.read_can()?.collect::<Result<_>>()?;
    assert_eq!(read, frames);
    assert_eq!(driver.queued_bytes(), 0);
    Ok(())
}

#[test]
fn mixed_frames_through_session() -> Result<()> {
    let driver = LoopbackDriver::new();
    let output = OutFrames::new(&driver, Handle(1));
    let input = InFrames::new(&driver, Handle(1));

    let frames = vec![
        XnetFrame::from(DelayFrame::new(10)),
        XnetFrame::from(CanFrame::new(
            CanIdentifier::extended(0x18FE_F100),
            FrameType::CanFdData,
            vec![0x55; 20],
        )),
    ];
    output.write_frames(&frames, Timeout::None)?;

    // The FD frame takes two base units, so three frames' worth of budget.
    let read: Vec<XnetFrame> = input.read_frames(3, Timeout::None)?.collect::<Result<_>>()?;
    assert_eq!(read, frames);
    Ok(())
}

#[test]
fn unsupported_frame_stops_typed_read() -> Result<()> {
    let driver = LoopbackDriver::new();
    driver.inject(&[
        RawFrame::new(1, 0x10, FrameType::CanData, vec![]),
        RawFrame::new(2, 0x10, FrameType::LinData, vec![]),
        RawFrame::new(3, 0x10, FrameType::CanData, vec![]),
    ])?;
    let input = InFrames::new(&driver, Handle(0));

    let results: Vec<Result<XnetFrame>> = input.read_frames(3, Timeout::None)?.collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(Error::UnsupportedFrameType(0x40)));
    Ok(())
}

#[test]
fn frame_property_setters() -> Result<()> {
    let driver = LoopbackDriver::with_items(["Cyclic"]);
    let output = OutFrames::new(&driver, Handle(9));
    let frame = output.get(0usize)?;

    frame.set_can_start_time_off(0.5)?;
    frame.set_can_tx_time(0.1)?;
    frame.set_skip_n_cyclic_frames(3)?;
    frame.set_output_queue_update_freq(2)?;
    frame.set_lin_tx_n_corrupted_chksums(1)?;
    frame.set_j1939_addr_filter("42")?;

    let expected = [
        (PropertyId::CanStartTimeOffset, PropertyValue::F64(0.5)),
        (PropertyId::CanTxTime, PropertyValue::F64(0.1)),
        (PropertyId::SkipNCyclicFrames, PropertyValue::U32(3)),
        (PropertyId::OutputQueueUpdateFreq, PropertyValue::U32(2)),
        (PropertyId::LinTxNCorruptedChecksums, PropertyValue::U32(1)),
        (PropertyId::J1939AddressFilter, PropertyValue::String("42".to_string())),
    ];
    let writes: Vec<PropertyWrite> = driver.properties();
    assert_eq!(writes.len(), expected.len());
    for (write, (property, value)) in writes.iter().zip(expected) {
        assert_eq!(write.handle, Handle(9));
        assert_eq!(write.index, 0);
        assert_eq!(write.property, property);
        assert_eq!(write.value, value);
    }
    Ok(())
}

#[test]
fn session_frames_iterate_in_list_order() -> Result<()> {
    let driver = LoopbackDriver::with_items(["A", "B"]);
    let input = InFrames::new(&driver, Handle(2));
    let names: Vec<String> = input.iter()?.map(|frame| frame.name().to_string()).collect();
    assert_eq!(names, ["A", "B"]);
    assert_eq!(input.get("B")?, input.get(1usize)?);
    Ok(())
}
