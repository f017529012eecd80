//! Tests for the wire codec and deadline-guarded I/O.

use super::*;
use crate::test_support::tcp_pair;
use std::io::{Read, Write};
use std::time::Duration;

fn timed_pair(policy: IoPolicy) -> (TimedStream, std::net::TcpStream) {
    let (left, right) = tcp_pair();
    (TimedStream::new(left, policy), right)
}

#[test]
fn test_action_codes() {
    assert_eq!(Action::try_from(1).unwrap(), Action::Lock);
    assert_eq!(Action::try_from(2).unwrap(), Action::Unlock);
    assert_eq!(Action::try_from(3).unwrap(), Action::ResetByKey);
    assert_eq!(Action::try_from(4).unwrap(), Action::ResetBySource);
    assert_eq!(Action::ResetBySource as u8, 4);
}

#[test]
fn test_unknown_action_is_protocol_error() {
    let err = Action::try_from(0).unwrap_err();
    assert!(matches!(err, LockError::Protocol(_)));

    let err = Action::try_from(9).unwrap_err();
    assert!(err.to_string().contains("undefined action 9"));
}

#[test]
fn test_manager_commands() {
    assert_eq!(ManagerCommand::parse(b"KEYS").unwrap(), ManagerCommand::Keys);
    assert_eq!(
        ManagerCommand::parse(b"RSET").unwrap(),
        ManagerCommand::ResetByKey
    );
    assert_eq!(
        ManagerCommand::parse(b"RSBS").unwrap(),
        ManagerCommand::ResetBySource
    );
    assert_eq!(ManagerCommand::ResetBySource.to_string(), "RSBS");
}

#[test]
fn test_unknown_manager_command_is_protocol_error() {
    let err = ManagerCommand::parse(b"keys").unwrap_err();
    assert!(matches!(err, LockError::Protocol(_)));
}

#[test]
fn test_deadline_grows_with_payload() {
    let policy = IoPolicy::new(Duration::from_secs(30), 625_000);

    assert_eq!(policy.deadline_for(0), Duration::from_secs(30));
    assert_eq!(policy.deadline_for(255), Duration::from_secs(30));
    assert_eq!(policy.deadline_for(625_000), Duration::from_secs(31));
    assert_eq!(policy.deadline_for(6_250_000), Duration::from_secs(40));
}

#[test]
fn test_zero_base_is_never_unbounded() {
    let policy = IoPolicy::new(Duration::ZERO, 0);
    assert!(!policy.deadline_for(0).is_zero());
}

#[test]
fn test_integers_are_little_endian() {
    let (mut timed, mut peer) = timed_pair(IoPolicy::default());

    timed.write_u32(0x0102_0304).unwrap();
    timed.write_i64(-2).unwrap();

    let mut buf = [0u8; 12];
    peer.read_exact(&mut buf).unwrap();
    assert_eq!(&buf[..4], &[0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&buf[4..], &(-2i64).to_le_bytes());
}

#[test]
fn test_read_str8_frames() {
    let (mut timed, mut peer) = timed_pair(IoPolicy::default());

    peer.write_all(&[5, b'f', b'i', b'l', b'e', b'1', 0]).unwrap();

    assert_eq!(timed.read_str8().unwrap(), "file1");
    assert_eq!(timed.read_str8().unwrap(), "");
}

#[test]
fn test_read_str8_rejects_invalid_utf8() {
    let (mut timed, mut peer) = timed_pair(IoPolicy::default());

    peer.write_all(&[2, 0xff, 0xfe]).unwrap();

    let err = timed.read_str8().unwrap_err();
    assert!(matches!(err, LockError::Protocol(_)));
}

#[test]
fn test_write_str8_rejects_oversized_string() {
    let (mut timed, _peer) = timed_pair(IoPolicy::default());

    let long = "k".repeat(MAX_STR8_LEN + 1);
    let err = timed.write_str8(&long).unwrap_err();
    assert!(matches!(err, LockError::Protocol(_)));

    let longest = "k".repeat(MAX_STR8_LEN);
    timed.write_str8(&longest).unwrap();
}

#[test]
fn test_silent_peer_times_out() {
    let (mut timed, _peer) = timed_pair(IoPolicy::new(Duration::from_millis(50), 625_000));

    let err = timed.read_u8().unwrap_err();
    assert!(matches!(err, LockError::Timeout(_)), "got {:?}", err);
}

#[test]
fn test_closed_peer_is_eof() {
    let (mut timed, peer) = timed_pair(IoPolicy::default());
    drop(peer);

    let err = timed.read_u8().unwrap_err();
    assert!(err.is_peer_gone(), "got {:?}", err);
}

#[test]
fn test_idle_clears_deadline() {
    let (mut timed, mut peer) = timed_pair(IoPolicy::new(Duration::from_secs(5), 625_000));

    peer.write_all(&[7]).unwrap();
    timed.read_u8().unwrap();
    assert_eq!(
        timed.get_ref().read_timeout().unwrap(),
        Some(Duration::from_secs(5))
    );

    timed.idle().unwrap();
    assert_eq!(timed.get_ref().read_timeout().unwrap(), None);
    assert_eq!(timed.get_ref().write_timeout().unwrap(), None);
}
