// Mon Aug 24 2026 - Alex

pub mod error;
pub mod extractor;
pub mod normalize;
pub mod record;

pub use error::LayoutError;
pub use extractor::{
    LayoutExtractor, DEFAULT_CACHE_LINE_SIZE, DEFAULT_POINTER_LABEL, DEFAULT_SENTINEL,
};
pub use normalize::normalize_field_name;
pub use record::{LayoutRecord, StructLayout};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ParseSession;

    // Shape of the header the original toolchain was pointed at: marker
    // typedefs, a cache-line sentinel, pointers, bit-fields, and a
    // conditional field selected by RTE_NEXT_ABI.
    const MBUF_HEADER: &str = r#"
typedef uint64_t MARKER[0];
typedef uint8_t MARKER8[0];
typedef uint64_t phys_addr_t;

struct rte_mempool;

struct rte_mbuf {
    MARKER cacheline0;

    void *buf_addr;
    phys_addr_t buf_physaddr;
    uint16_t buf_len;
    MARKER8 rearm_data;
    uint16_t data_off;
    uint16_t refcnt;
    uint8_t nb_segs;
    uint8_t port;
    uint64_t ol_flags;
#ifdef RTE_NEXT_ABI
    uint32_t packet_type;
#else
    uint16_t packet_type;
#endif
    uint32_t pkt_len;
    uint16_t data_len;
    uint16_t vlan_tci;
    uint32_t rss_hash;
    uint32_t seqn;

    MARKER cacheline1;

    struct rte_mempool *pool;
    struct rte_mbuf *next;
    uint64_t tx_offload:16;
    uint16_t priv_size;
};
"#;

    #[test]
    fn test_mbuf_header_end_to_end() {
        let mut session = ParseSession::new();
        session.define("RTE_NEXT_ABI");
        let unit = session.parse_source(MBUF_HEADER).unwrap();

        let layout = LayoutExtractor::new()
            .extract_by_name(unit.root(), "rte_mbuf")
            .unwrap();

        let rows: Vec<(u64, &str, &str, u64)> = layout
            .records()
            .iter()
            .map(|r| (r.offset(), r.name(), r.type_label(), r.size()))
            .collect();

        assert_eq!(rows[0], (0, "BufAddr", "IntPtr", 8));
        assert_eq!(rows[1], (8, "BufPhysaddr", "phys_addr_t", 8));
        assert_eq!(rows[2], (16, "BufLen", "uint16_t", 2));
        // RearmData is a zero-length marker: skipped, offset unchanged.
        assert_eq!(rows[3], (18, "DataOff", "uint16_t", 2));
        // RTE_NEXT_ABI selects the 4-byte packet_type.
        let packet_type = rows.iter().find(|r| r.1 == "PacketType").unwrap();
        assert_eq!(packet_type.3, 4);
        // Everything after the sentinel starts at the cache-line boundary.
        let pool = rows.iter().find(|r| r.1 == "Pool").unwrap();
        assert_eq!((pool.0, pool.2), (64, "IntPtr"));
        let next = rows.iter().find(|r| r.1 == "Next").unwrap();
        assert_eq!((next.0, next.2), (72, "IntPtr"));
        // The bit-field is skipped, so priv_size lands right after next.
        let priv_size = rows.iter().find(|r| r.1 == "PrivSize").unwrap();
        assert_eq!(priv_size.0, 80);
        // No sentinel or marker row made it into the output.
        assert!(rows.iter().all(|r| r.1 != "Cacheline0" && r.1 != "Cacheline1"));
    }

    #[test]
    fn test_mbuf_without_next_abi_shrinks_packet_type() {
        let session = ParseSession::new();
        let unit = session.parse_source(MBUF_HEADER).unwrap();
        let layout = LayoutExtractor::new()
            .extract_by_name(unit.root(), "rte_mbuf")
            .unwrap();
        let packet_type = layout
            .records()
            .iter()
            .find(|r| r.name() == "PacketType")
            .unwrap();
        assert_eq!(packet_type.size(), 2);
    }

    #[test]
    fn test_missing_struct_is_not_found() {
        let session = ParseSession::new();
        let unit = session.parse_source("struct other { int x; };\n").unwrap();
        let err = LayoutExtractor::new()
            .extract_by_name(unit.root(), "rte_mbuf")
            .unwrap_err();
        assert!(matches!(err, LayoutError::StructNotFound(_)));
    }
}
