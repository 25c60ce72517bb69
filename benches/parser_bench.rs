//! Parser benchmarks: plain JavaScript, TypeScript with heavy speculation,
//! and JSX, plus throughput over generated sources.

use anyhow::{Context, Result, ensure};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use plait::{ParserOptions, parse};

// =============================================================================
// Sources
// =============================================================================

const JS_SOURCE: &str = r#"
import { readFile } from "fs";

export class Cache {
    #entries = new Map();
    static instances = 0;

    constructor(limit = 100) {
        this.limit = limit;
        Cache.instances += 1;
    }

    get size() {
        return this.#entries.size;
    }

    async load(path, { encoding = "utf8", ...rest } = {}) {
        const text = await readFile(path, encoding);
        for (const [key, value] of Object.entries(JSON.parse(text))) {
            if (this.size >= this.limit) break;
            this.#entries.set(key, value ?? rest.fallback);
        }
        return `${this.size} entries from ${path}`;
    }
}

export default function* keys(cache) {
    yield* cache.keys();
}
"#;

const TS_SOURCE: &str = r#"
interface Point<T = number> {
    readonly x: T;
    y?: T;
    [key: string]: T | undefined;
}

type Pair<A, B> = [A, B];
enum Direction { Up = 1, Down, Left, Right }

class Grid<T extends Point> implements Iterable<T> {
    private cells: Map<string, T[]> = new Map<string, T[]>();

    constructor(public readonly width: number, protected height: number) {}

    at<K extends keyof T>(key: K, fallback?: T[K]): T[K] | undefined {
        const found = this.cells.get(String(key)) as T[] | undefined;
        return found?.[0]?.[key] ?? fallback;
    }

    *[Symbol.iterator](): Iterator<T> {
        for (const row of this.cells.values()) yield* row;
    }
}

const compare = <T>(a: T, b: T): boolean => a < b;
const nested: Array<Array<Pair<string, number>>> = [];
const generic = make<Grid<Point>>(1, 2);
const less = width < height && height > depth;
"#;

const JSX_SOURCE: &str = r#"
export function List({ items, onSelect }) {
    return (
        <ul className="list" data-count={items.length}>
            {items.map(item => (
                <li key={item.id} onClick={() => onSelect(item)}>
                    {item.label} &amp; more
                    <Icon.Small name="chevron" {...item.icon} />
                </li>
            ))}
            <>
                <span>footer</span>
            </>
        </ul>
    );
}
"#;

fn options(json: &str) -> Result<ParserOptions> {
    serde_json::from_str(json).with_context(|| format!("invalid bench options {json}"))
}

fn js_options() -> Result<ParserOptions> {
    options(r#"{ "sourceType": "module" }"#)
}

fn ts_options() -> Result<ParserOptions> {
    options(r#"{ "sourceType": "module", "plugins": ["typescript"] }"#)
}

fn jsx_options() -> Result<ParserOptions> {
    options(r#"{ "sourceType": "module", "plugins": ["jsx"] }"#)
}

/// Parse once outside the timed loop so a broken sample fails loudly
/// instead of benchmarking the error path.
fn checked(source: &str, options: &ParserOptions) -> Result<()> {
    let output = parse(source, options).context("bench source failed to parse")?;
    ensure!(!output.arena.is_empty(), "bench source produced no nodes");
    Ok(())
}

fn generate_ts_source(functions: usize, statements_per_fn: usize) -> String {
    let mut source = String::new();
    for f in 0..functions {
        source.push_str(&format!(
            "function fn{f}<T extends object>(x: number, y: Map<string, T>): number {{\n"
        ));
        for s in 0..statements_per_fn {
            source.push_str(&format!("    let v{s}: number = x < {s} ? x : y.size;\n"));
        }
        source.push_str("    return x + y.size;\n}\n\n");
    }
    for f in 0..functions {
        source.push_str(&format!("const r{f} = fn{f}<Point>(1, new Map());\n"));
    }
    source
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_samples(c: &mut Criterion) {
    let samples = [
        ("javascript", JS_SOURCE, js_options()),
        ("typescript", TS_SOURCE, ts_options()),
        ("jsx", JSX_SOURCE, jsx_options()),
    ];
    let mut group = c.benchmark_group("parse_sample");
    for (name, source, options) in samples {
        let options = options.expect("bench options");
        checked(source, &options).expect("bench sample");
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| black_box(parse(source, &options)))
        });
    }
    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let options = ts_options().expect("bench options");
    let mut group = c.benchmark_group("parse_throughput");
    for (functions, statements) in [(10, 5), (50, 5), (100, 10)] {
        let source = generate_ts_source(functions, statements);
        checked(&source, &options).expect("generated source");
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("typescript", format!("{functions}fn_{statements}stmt")),
            &source,
            |b, source| b.iter(|| black_box(parse(source, &options))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_samples, bench_throughput);
criterion_main!(benches);
