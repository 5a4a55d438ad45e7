use ai_tools::{SharedTraceLog, TraceEvent, TraceLog, TraceSink, VecTraceSink};

#[test]
fn vec_sink_records_in_order() {
    let mut sink = VecTraceSink::default();
    sink.emit(TraceEvent::new(1, "test").with_a(10).with_b(20));
    sink.emit(TraceEvent::new(2, "other"));

    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.events[0].tick, 1);
    assert_eq!(sink.events[0].tag, "test");
    assert_eq!(sink.events[0].a, 10);
    assert_eq!(sink.events[0].b, 20);
    assert_eq!(sink.events[1].tag, "other");
}

#[test]
fn shared_log_is_visible_through_clones() {
    let log = SharedTraceLog::new();
    let mut boxed: Box<dyn TraceSink> = Box::new(log.clone());

    boxed.emit(TraceEvent::new(3, "bt.start"));
    boxed.emit(TraceEvent::new(3, "bt.end"));
    boxed.emit(TraceEvent::new(4, "bt.start"));

    assert_eq!(log.len(), 3);
    assert_eq!(log.count("bt.start"), 2);
    assert_eq!(log.snapshot().tags(), vec!["bt.start", "bt.end", "bt.start"]);

    log.clear();
    assert!(log.is_empty());
}

#[test]
fn trace_log_filters_by_tag() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, "a").with_a(1));
    log.push(TraceEvent::new(1, "b"));
    log.push(TraceEvent::new(2, "a").with_a(2));

    let ticks: Vec<u64> = log.with_tag("a").map(|e| e.a).collect();
    assert_eq!(ticks, vec![1, 2]);
    assert_eq!(log.count("missing"), 0);
}
