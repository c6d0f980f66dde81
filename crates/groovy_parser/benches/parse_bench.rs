use criterion::{black_box, criterion_group, criterion_main, Criterion};
use groovy_options::ParserOptions;
use groovy_parser::Parser;

// A medium-size Groovy script mixing classes, closures and command calls
const GROOVY_SOURCE: &str = r#"
package demo.users

import java.util.concurrent.ConcurrentHashMap
import static java.lang.Math.max

// Plain data holder
class User {
    final long id
    String name
    String email
    Map<String, List<String>> tags = [:]

    User(long id, String name, String email) {
        this.id = id
        this.name = name
        this.email = email
    }

    String toString() { "User(${id}, $name)" }
}

interface Repository<T> {
    T find(long id)
    List<T> all()
}

enum Role { ADMIN, EDITOR, VIEWER }

class UserService implements Repository<User> {
    private Map<Long, User> users = new ConcurrentHashMap<Long, User>()
    private long nextId = 1

    User create(String name, String email) {
        def user = new User(nextId++, name, email)
        users[user.id] = user
        return user
    }

    User find(long id) { users[id] }

    List<User> all() {
        users.values().sort { a, b -> a.name <=> b.name }
    }

    def rename(long id, String name) {
        User user = find(id)
        if (user == null) {
            throw new IllegalArgumentException("no user $id")
        }
        user.name = name
        user
    }
}

def service = new UserService()
['ada', 'grace', 'linus'].eachWithIndex { name, i ->
    service.create name, "${name}@example.com"
}

def longest = service.all().inject(0) { acc, u -> max(acc, u.name.size()) }
for (User u in service.all()) {
    switch (u.name.size()) {
        case 1..3:
            println "short: ${u.name}"
            break
        default:
            println "long: ${u.name}"
    }
}

try {
    service.rename 42, 'nobody'
} catch (IllegalArgumentException e) {
    println e.message
} finally {
    assert longest > 0 : 'expected users'
}
"#;

fn bench_parse_groovy(c: &mut Criterion) {
    let options = ParserOptions::default();
    c.bench_function("parse_groovy_medium", |b| {
        b.iter(|| {
            let parser = Parser::new(black_box(GROOVY_SOURCE), Some("bench.groovy"), &options);
            let output = parser.parse_compilation_unit();
            let _ = black_box(output);
        });
    });
}

criterion_group!(benches, bench_parse_groovy);
criterion_main!(benches);
