fn main() {
    star_catcher::game::run();
}
