use std::env;
use std::path::Path;
use std::process;

use env_logger::{Builder, Env};
use vmsim::modules::backing_storage::FileBackingStorage;
use vmsim::{MemoryManager, SimConfig};

type Sim = MemoryManager<FileBackingStorage, FileBackingStorage>;

fn main() {
    Builder::from_env(Env::default())
        .filter_level(log::LevelFilter::Info)
        .format_module_path(false)
        .init();

    let mut args = env::args().skip(1);
    let image_path = args.next().unwrap_or_else(|| "exec_file".to_string());
    let swap_path = args.next().unwrap_or_else(|| "swap_file".to_string());

    // four segments over 32-byte pages, two physical frames: the third page
    // touched below already forces an eviction through the swap file
    let config = SimConfig {
        text_size: 16,
        data_size: 16,
        bss_size: 16,
        heap_stack_size: 32,
        page_size: 32,
        memory_size: 64,
    };

    if !Path::new(&image_path).exists() {
        // a tiny deterministic image so the demo runs out of the box
        let image: Vec<u8> = (0u8..32).map(|i| b'a' + (i % 26)).collect();
        if let Err(err) = std::fs::write(&image_path, image) {
            eprintln!("cannot create demo image {}: {}", image_path, err);
            process::exit(1);
        }
    }

    let mut sim = match Sim::from_files(&image_path, &swap_path, config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("cannot construct simulator: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run_scenario(&mut sim) {
        eprintln!("simulation failed: {}", err);
        process::exit(1);
    }

    print_memory(&sim);
    print_swap(&mut sim);
    print_page_table(&sim);
}

fn run_scenario(sim: &mut Sim) -> Result<(), vmsim::SimError> {
    sim.store(20, b'X')?;
    println!("store(20, 'X')");
    println!("load(20) -> {:?}", sim.load(20)? as char);
    println!("load(8)  -> {:?}", sim.load(8)? as char);

    // touching two more pages exhausts both frames and evicts page 0
    println!("load(40) -> {:#04x}", sim.load(40)?);
    println!("load(70) -> {:#04x}", sim.load(70)?);

    // page 0 comes back in through the swap store
    println!("load(20) -> {:?}", sim.load(20)? as char);

    Ok(())
}

fn print_memory(sim: &Sim) {
    println!("\nPhysical memory");
    let page_size = sim.layout().page_size();
    for (frame, bytes) in sim.physical_memory().as_bytes().chunks(page_size).enumerate() {
        print!("frame {} - ", frame);
        for byte in bytes {
            print!("[{}]", printable(*byte));
        }
        println!();
    }
}

fn print_swap(sim: &mut Sim) {
    println!("\nSwap memory");
    for slot in 0..sim.swap_slot_count() {
        match sim.read_swap_slot(slot) {
            Ok(bytes) => {
                print!("slot {} - ", slot);
                for byte in &bytes {
                    print!("[{}]", printable(*byte));
                }
                println!();
            }
            Err(err) => println!("slot {} - unreadable: {}", slot, err),
        }
    }
}

fn print_page_table(sim: &Sim) {
    println!("\nPage table");
    println!("page\tvalid\tdirty\tframe\tswap slot");
    for (page, entry) in sim.page_table().iter().enumerate() {
        println!(
            "{}\t[{}]\t[{}]\t[{}]\t[{}]",
            page,
            entry.valid as u8,
            entry.dirty as u8,
            entry.frame.map_or("-".to_string(), |frame| frame.to_string()),
            entry
                .swap_slot
                .map_or("-".to_string(), |slot| slot.to_string()),
        );
    }
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() {
        byte as char
    } else {
        '.'
    }
}
