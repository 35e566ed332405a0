use std::cell::{
    Cell,
    RefCell,
};
use std::collections::HashMap;
use std::io::{
    Error as IoError,
    ErrorKind,
    Read,
    Write,
};
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;

use macspoof::mac::{
    MacController,
    ScriptedHex,
};
use macspoof::sys::{
    AdapterClass,
    AdapterEntry,
    AdapterRegistry,
    CommandOutput,
    CommandRunner,
};
use macspoof::{
    Error,
    Result,
};

/// Records every command and answers from a table keyed by command line.
/// Unknown commands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: Vec<String>,
    replies: HashMap<String, Option<String>>,
}

impl FakeRunner {
    #[allow(dead_code)]
    pub fn new() -> FakeRunner {
        FakeRunner::default()
    }

    #[allow(dead_code)]
    pub fn reply(mut self, command: &str, stdout: &str) -> FakeRunner {
        self.replies.insert(command.to_string(), Some(stdout.to_string()));
        self
    }

    #[allow(dead_code)]
    pub fn fail(mut self, command: &str) -> FakeRunner {
        self.replies.insert(command.to_string(), None);
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut command = vec![program];
        command.extend_from_slice(args);
        let command = command.join(" ");
        self.calls.push(command.clone());

        match self.replies.get(&command) {
            Some(&Some(ref stdout)) => Ok(CommandOutput::from_bytes(stdout.as_bytes())),
            Some(&None) => Err(Error::Command {
                program: program.to_string(),
                code: Some(1),
                stderr: String::from("Boom"),
            }),
            None => Ok(CommandOutput::from_bytes(b"")),
        }
    }
}

#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum Slot {
    Adapter(&'static str),
    Unreadable,
}

/// Adapter subkeys held in memory. Writes and reads are shared with every
/// opened class handle.
#[derive(Clone, Default)]
pub struct FakeRegistry {
    slots: Vec<Slot>,
    pub writes: Rc<RefCell<Vec<(usize, String)>>>,
    pub reads: Rc<Cell<usize>>,
}

impl FakeRegistry {
    #[allow(dead_code)]
    pub fn new(slots: Vec<Slot>) -> FakeRegistry {
        FakeRegistry {
            slots,
            ..FakeRegistry::default()
        }
    }
}

pub struct FakeClass {
    registry: FakeRegistry,
}

impl AdapterRegistry for FakeRegistry {
    type Class = FakeClass;

    fn open_class(&self) -> Result<FakeClass> {
        Ok(FakeClass {
            registry: self.clone(),
        })
    }
}

impl AdapterClass for FakeClass {
    fn entry(&self, index: usize) -> Result<Option<AdapterEntry>> {
        self.registry.reads.set(self.registry.reads.get() + 1);
        match self.registry.slots.get(index) {
            Some(&Slot::Adapter(description)) => Ok(Some(AdapterEntry {
                instance_id: format!("{{GUID-{}}}", index),
                description: description.to_string(),
            })),
            Some(&Slot::Unreadable) => Err(Error::Registry(IoError::new(
                ErrorKind::Other,
                "value missing",
            ))),
            None => Ok(None),
        }
    }

    fn set_network_address(&self, index: usize, value: &str) -> Result<()> {
        self.registry
            .writes
            .borrow_mut()
            .push((index, value.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub type Controller = MacController<FakeRunner, FakeRegistry, ScriptedHex>;

/// Digits yielding a2:bc:de:f1:23:45.
#[allow(dead_code)]
pub const LOWER_SCRIPT: &str = "abcdef123452";

/// Digits yielding A2-BC-DE-F1-23-45.
#[allow(dead_code)]
pub const UPPER_SCRIPT: &str = "ABCDEF123452";

#[allow(dead_code)]
pub fn controller(runner: FakeRunner, registry: FakeRegistry, script: &str) -> Controller {
    MacController::new(runner, registry, ScriptedHex::new(script))
}

/// Serves one HTTP exchange on a loopback port, answering with response.
/// The handle yields the raw request head.
#[allow(dead_code)]
pub fn serve_once(response: &'static str) -> (String, thread::JoinHandle<String>) {
    serve(response.as_bytes().to_vec())
}

/// Answers a single request with raw response bytes, returning the request.
#[allow(dead_code)]
pub fn serve(response: Vec<u8>) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = vec![];
        let mut buffer = [0; 1024];
        while !request.ends_with(b"\r\n\r\n") {
            let read = stream.read(&mut buffer).unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        stream.write_all(&response).unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });

    (url, handle)
}
